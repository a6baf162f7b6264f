mod ids;

pub use ids::new_transaction_id;

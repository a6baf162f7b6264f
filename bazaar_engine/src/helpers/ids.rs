use rand::Rng;

/// Generates a payment-processor style transaction identifier: the fixed `TXN-` prefix followed
/// by 8 random uppercase hex characters. Uniqueness is not enforced beyond the randomness.
pub fn new_transaction_id() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("TXN-{suffix:08X}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transaction_ids_have_the_expected_shape() {
        for _ in 0..100 {
            let id = new_transaction_id();
            assert_eq!(id.len(), 12);
            assert!(id.starts_with("TXN-"));
            assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }
}

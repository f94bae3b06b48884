//! Additive homomorphism over ciphertexts
//!
//! Adding two ciphertexts component-wise yields an encryption of the sum of
//! their plaintexts, provided both were encrypted under the same public key.
//! Points carry no key identity, so that precondition belongs to the caller.

use super::cipher::Ciphertext;
use super::context::BabyJubJub;
use crate::curve::Point;

impl Ciphertext {
    /// `{a.C1 + b.C1, a.C2 + b.C2}`
    pub fn add(&self, other: &Ciphertext) -> Ciphertext {
        Ciphertext::new(self.c1().add(other.c1()), self.c2().add(other.c2()))
    }
}

impl BabyJubJub {
    pub fn add_ciphertexts(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        a.add(b)
    }

    /// Plain group addition, for combining public keys or embedded points.
    pub fn add_points(&self, p: &Point, q: &Point) -> Point {
        p.add(q)
    }

    /// Fold any number of same-key ciphertexts; empty input gives the
    /// identity ciphertext.
    pub fn sum_ciphertexts<'a, I>(&self, ciphertexts: I) -> Ciphertext
    where
        I: IntoIterator<Item = &'a Ciphertext>,
    {
        ciphertexts
            .into_iter()
            .fold(Ciphertext::identity(), |acc, ct| acc.add(ct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Scalar;
    use crate::elgamal::keys::PrivateKey;

    #[test]
    fn test_sum_decrypts_to_sum_of_plaintexts() {
        let ctx = BabyJubJub::global().unwrap();
        let sk = PrivateKey::from(2024);
        let pk = ctx.private_to_public_key(&sk);

        let a = ctx.encrypt(&pk, 9900u64, &Scalar::from_u64(111)).unwrap();
        let b = ctx.encrypt(&pk, 100u64, &Scalar::from_u64(222)).unwrap();
        let sum = ctx.add_ciphertexts(&a, &b);

        assert_eq!(ctx.decrypt_embedded(&sk, &sum), ctx.encode(10000u64).unwrap());
    }

    #[test]
    fn test_sum_equals_encryption_with_summed_randomness() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(77));
        let r1 = Scalar::from_u64(1000);
        let r2 = Scalar::from_u64(2000);

        let a = ctx.encrypt(&pk, 40u64, &r1).unwrap();
        let b = ctx.encrypt(&pk, 2u64, &r2).unwrap();
        let direct = ctx.encrypt(&pk, 42u64, &r1.add(&r2)).unwrap();

        assert_eq!(a.add(&b), direct);
    }

    #[test]
    fn test_identity_is_neutral() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(3));
        let ct = ctx.encrypt(&pk, 5u64, &Scalar::from_u64(8)).unwrap();
        assert_eq!(ct.add(&Ciphertext::identity()), ct);
    }

    #[test]
    fn test_sum_ciphertexts() {
        let ctx = BabyJubJub::global().unwrap();
        let sk = PrivateKey::from(31337);
        let pk = ctx.private_to_public_key(&sk);
        let cts: Vec<Ciphertext> = (1u64..=4)
            .map(|m| ctx.encrypt(&pk, m, &Scalar::from_u64(m * 13)).unwrap())
            .collect();

        let total = ctx.sum_ciphertexts(&cts);
        assert_eq!(ctx.decrypt_embedded(&sk, &total), ctx.encode(10u64).unwrap());
        assert_eq!(ctx.sum_ciphertexts(&Vec::<Ciphertext>::new()), Ciphertext::identity());
    }

    #[test]
    fn test_add_points_combines_public_keys() {
        let ctx = BabyJubJub::global().unwrap();
        let pk1 = ctx.private_to_public_key(&PrivateKey::from(10));
        let pk2 = ctx.private_to_public_key(&PrivateKey::from(32));
        let combined = ctx.add_points(pk1.as_point(), pk2.as_point());
        assert_eq!(&combined, ctx.private_to_public_key(&PrivateKey::from(42)).as_point());
        assert!(combined.is_on_curve());
    }
}

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("malformed password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_accepts_matching_password() {
        let hash = hash_password("hunter2hunter2").expect("hash");
        assert!(verify_password("hunter2hunter2", &hash).expect("verify"));
    }

    #[test]
    fn rejects_wrong_password() {
        let hash = hash_password("first-password").expect("hash");
        assert!(!verify_password("other-password", &hash).expect("verify"));
    }

    #[test]
    fn errors_on_malformed_hash() {
        assert!(verify_password("anything", "garbage").is_err());
    }
}

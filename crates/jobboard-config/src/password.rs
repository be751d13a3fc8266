use crate::{ConfigError, parse_or};

/// bcrypt work factor used when hashing new passwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { cost: 10 }
    }
}

impl PasswordConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cost = parse_or(lookup, "BCRYPT_COST", Self::default().cost)?;

        // bcrypt only accepts costs in 4..=31
        if !(4..=31).contains(&cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self { cost })
    }
}

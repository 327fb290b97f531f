use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Public base URL used to build the file URLs returned by the upload routes.
    pub app_base_url: String,
    pub media_dir: String,
    /// Amount a lazily-materialized monthly fee entry starts at.
    pub default_fee_amount: i64,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_api_url: String,
    /// SMTP relay for complaint mail sent with a teacher's own credentials.
    pub smtp_relay: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            media_dir: env::var("MEDIA_DIR").unwrap_or_else(|_| "/data/uploads".into()),
            default_fee_amount: env::var("DEFAULT_FEE_AMOUNT")
                .unwrap_or_else(|_| "1000".into())
                .parse()?,
            razorpay_key_id: required("RAZORPAY_KEY_ID")?,
            razorpay_key_secret: required("RAZORPAY_KEY_SECRET")?,
            razorpay_api_url: env::var("RAZORPAY_API_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into()),
            smtp_relay: env::var("SMTP_RELAY").unwrap_or_else(|_| "smtp.gmail.com".into()),
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the env mutations cannot race each other.
    #[test]
    fn missing_required_vars_fail_then_defaults_apply() {
        env::remove_var("DATABASE_URL");
        env::remove_var("RAZORPAY_KEY_ID");
        env::remove_var("RAZORPAY_KEY_SECRET");
        assert!(Config::from_env().is_err());

        env::set_var("DATABASE_URL", "postgres://localhost/schoolverse");
        env::set_var("RAZORPAY_KEY_ID", "rzp_test_key");
        env::set_var("RAZORPAY_KEY_SECRET", "rzp_test_secret");
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("DEFAULT_FEE_AMOUNT");
        env::remove_var("SMTP_RELAY");

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.default_fee_amount, 1000);
        assert_eq!(config.smtp_relay, "smtp.gmail.com");
        assert_eq!(config.razorpay_api_url, "https://api.razorpay.com/v1");

        env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());
        env::remove_var("PORT");
    }
}

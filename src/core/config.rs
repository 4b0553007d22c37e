use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub clerk: ClerkConfig,
    pub stripe: StripeConfig,
    pub blob_store: BlobStoreConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Configuration for the Clerk identity provider: the Svix webhook signing
/// secret plus the management API credentials used to write user metadata.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// Svix signing secret (`whsec_...`) shared with Clerk
    pub webhook_secret: String,
    /// Bearer key for the Clerk management API
    pub secret_key: String,
    /// Base URL of the Clerk management API
    pub api_base_url: String,
    /// Maximum allowed clock skew for webhook timestamps, in seconds
    pub webhook_tolerance_secs: u64,
}

/// Stripe billing configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base_url: String,
}

/// Remote blob listing service configuration
#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    /// Base URL of the listing service (exposes `GET /list-blobs`)
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            clerk: ClerkConfig::from_env()?,
            stripe: StripeConfig::from_env()?,
            blob_store: BlobStoreConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CloudCorp API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for CloudCorp".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

impl ClerkConfig {
    const DEFAULT_WEBHOOK_TOLERANCE_SECS: u64 = 300; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        let webhook_secret = env::var("CLERK_WEBHOOK_SECRET")
            .map_err(|_| "CLERK_WEBHOOK_SECRET environment variable is required".to_string())?;

        let secret_key = env::var("CLERK_SECRET_KEY")
            .map_err(|_| "CLERK_SECRET_KEY environment variable is required".to_string())?;

        let api_base_url =
            env::var("CLERK_API_URL").unwrap_or_else(|_| "https://api.clerk.com/v1".to_string());

        let webhook_tolerance_secs = env::var("WEBHOOK_TOLERANCE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_WEBHOOK_TOLERANCE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "WEBHOOK_TOLERANCE_SECS must be a valid number".to_string())?;

        Ok(Self {
            webhook_secret,
            secret_key,
            api_base_url,
            webhook_tolerance_secs,
        })
    }
}

impl StripeConfig {
    pub fn from_env() -> Result<Self, String> {
        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| "STRIPE_SECRET_KEY environment variable is required".to_string())?;

        let api_base_url =
            env::var("STRIPE_API_URL").unwrap_or_else(|_| "https://api.stripe.com/v1".to_string());

        Ok(Self {
            secret_key,
            api_base_url,
        })
    }
}

impl BlobStoreConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("BLOB_STORE_URL")
            .unwrap_or_else(|_| "https://blob-cloudcorprecord.replit.app".to_string());

        Ok(Self { base_url })
    }
}

use {
    crate::api::RestError,
    jsonwebtoken::{
        decode,
        encode,
        Algorithm,
        DecodingKey,
        EncodingKey,
        Header,
        Validation,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::{
        Duration,
        OffsetDateTime,
    },
};

/// Issued credentials are valid for one hour.
pub const TOKEN_TTL: Duration = Duration::hours(1);

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Claims {
    pub email: String,
    pub iat:   i64,
    pub exp:   i64,
}

/// The authenticated identity derived from a verified credential.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    pub email: String,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, RestError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            email: email.to_string(),
            iat:   now.unix_timestamp(),
            exp:   (now + TOKEN_TTL).unix_timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = e.to_string(), "Failed to sign access token");
            RestError::TemporarilyUnavailable
        })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, RestError> {
        let data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| RestError::Unauthorized)?;
        Ok(Principal {
            email: data.claims.email,
        })
    }
}

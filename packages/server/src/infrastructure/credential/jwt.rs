//! JWT (JSON Web Token) credential service.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, CredentialError, CredentialService, ParticipantId, VerifiedIdentity};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,   // Subject (participant ID)
    pub email: String, // Login email
    pub is_staff: bool,
    pub iat: u64, // Issued at
    pub exp: u64, // Expiration time
}

/// HS256 token issuer/verifier
pub struct JwtCredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: Duration,
}

impl JwtCredentialService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_duration: Duration::from_secs(24 * 60 * 60), // 24 hours default
        }
    }

    /// Set custom token duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.token_duration = duration;
        self
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, CredentialError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| CredentialError::IssueFailed(e.to_string()))
    }
}

impl CredentialService for JwtCredentialService {
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, CredentialError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| CredentialError::InvalidCredential(e.to_string()))?;

        let participant_id = ParticipantId::new(token_data.claims.sub)
            .map_err(|e| CredentialError::InvalidCredential(e.to_string()))?;

        Ok(VerifiedIdentity {
            participant_id,
            is_staff: token_data.claims.is_staff,
        })
    }

    fn issue(&self, account: &Account) -> Result<String, CredentialError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| CredentialError::IssueFailed("System time error".to_string()))?;

        let claims = Claims {
            sub: account.id.as_str().to_string(),
            email: account.email.clone(),
            is_staff: account.is_staff,
            iat: now.as_secs(),
            exp: (now + self.token_duration).as_secs(),
        };

        self.encode_claims(&claims)
    }
}

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (username)
    pub exp: usize,  // expiration time
    pub iat: usize,  // issued at
    pub iss: String, // issuer
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn new(sub: String, issuer: String, roles: Vec<String>, expiration_seconds: u64) -> Self {
        let now = Utc::now().timestamp().max(0) as usize;
        Self {
            sub,
            exp: now + expiration_seconds as usize,
            iat: now,
            iss: issuer,
            roles,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT encode error: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("JWT decode error: {0}")]
    Decode(jsonwebtoken::errors::Error),
}

/// JWT服务
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiration: u64,
}

impl JwtService {
    /// 创建新的JWT服务
    pub fn new(secret: &str, issuer: impl Into<String>, expiration: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            expiration,
        }
    }

    /// 生成JWT令牌
    pub fn generate(&self, username: &str, roles: Vec<String>) -> Result<String, JwtError> {
        let claims = Claims::new(username.to_string(), self.issuer.clone(), roles, self.expiration);
        encode(&Header::default(), &claims, &self.encoding_key).map_err(JwtError::Encode)
    }

    /// 验证JWT令牌
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::Decode)
    }

    /// 获取过期时间（秒）
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generate_and_verify() {
        let service = JwtService::new("test_secret", "campus", 3600);

        let token = service.generate("admin", vec!["admin".to_string()]).unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "campus");
        assert_eq!(claims.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn test_jwt_rejects_foreign_secret_and_issuer() {
        let service = JwtService::new("test_secret", "campus", 3600);
        let token = service.generate("admin", Vec::new()).unwrap();

        let other_secret = JwtService::new("other_secret", "campus", 3600);
        assert!(other_secret.verify(&token).is_err());

        let other_issuer = JwtService::new("test_secret", "elsewhere", 3600);
        assert!(other_issuer.verify(&token).is_err());
        assert!(service.verify("not-a-token").is_err());
    }
}

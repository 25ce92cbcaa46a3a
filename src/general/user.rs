use super::GeneralService;
use crate::constants::{PATH_USER_ADD_REFERRAL, PATH_USER_ME, PATH_USER_REFRESH_TOKEN};
use crate::error::Result;
use crate::models::{AddReferralRequest, RefreshedToken, User};

impl GeneralService {
    /// The profile of the account that owns the API key.
    pub async fn user(&self) -> Result<User> {
        const OP: &str = "get user";
        self.send(self.get(PATH_USER_ME), OP).await?.require(OP)
    }

    /// Issues a new API token. The client keeps using the key it was built with.
    pub async fn refresh_token(&self) -> Result<String> {
        const OP: &str = "refresh token";
        let refreshed: RefreshedToken = self
            .send(self.post(PATH_USER_REFRESH_TOKEN), OP)
            .await?
            .require(OP)?;
        Ok(refreshed.token)
    }

    pub async fn add_referral(&self, referral_code: &str) -> Result<()> {
        const OP: &str = "add referral";
        let body = AddReferralRequest {
            referral_code: referral_code.to_string(),
        };
        self.send::<serde_json::Value>(self.post(PATH_USER_ADD_REFERRAL).json(&body), OP)
            .await?
            .check(OP)
    }
}

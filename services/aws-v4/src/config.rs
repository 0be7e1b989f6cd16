use awsign_core::utils::Redact;
use awsign_core::{Env, Error, Result};
use log::debug;
use std::fmt::{Debug, Formatter};

use crate::constants::*;
use crate::{Credential, RequestSigner};

/// Config carries the values a [`RequestSigner`] and its [`Credential`] are
/// built from.
///
/// Fields already set take precedence over values loaded by
/// [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// `service` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SERVICE`]
    pub service: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field(
                "secret_access_key",
                &Redact::secret(self.secret_access_key.as_deref().unwrap_or_default()),
            )
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id = env.var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var(AWS_SECRET_ACCESS_KEY);
        }
        if self.region.is_none() {
            self.region = env
                .var(AWS_REGION)
                .or_else(|| env.var(AWS_DEFAULT_REGION));
        }
        if self.service.is_none() {
            self.service = env.var(AWS_SERVICE);
        }

        debug!("config loaded from env: {self:?}");
        self
    }

    /// Build the credential from the configured key pair.
    pub fn credential(&self) -> Result<Credential> {
        let cred = match (&self.access_key_id, &self.secret_access_key) {
            (Some(ak), Some(sk)) => Credential::new(ak.as_str(), sk.as_str()),
            _ => {
                return Err(Error::credential_invalid(
                    "access_key_id and secret_access_key are required",
                ))
            }
        };

        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access_key_id and secret_access_key must not be empty",
            ));
        }

        Ok(cred)
    }

    /// Build the request signer for the configured region and service.
    pub fn request_signer(&self) -> Result<RequestSigner> {
        let region = self
            .region
            .as_deref()
            .ok_or_else(|| Error::config_invalid("region is required"))?;
        let service = self
            .service
            .as_deref()
            .ok_or_else(|| Error::config_invalid("service is required"))?;

        Ok(RequestSigner::new(service, region))
    }
}

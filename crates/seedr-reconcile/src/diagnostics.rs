//! `Test`: field-scoped health checks run on demand (typically at adapter
//! startup, or when an operator asks "is this configured correctly?").

use seedr_core::{CloudError, ValidationFailure, ValidationField};

use crate::reconciler::Reconciler;

/// Fraction of quota used at which `Test` surfaces a storage warning.
const QUOTA_WARNING_THRESHOLD: f64 = 0.90;

impl Reconciler {
    /// Run every configured health check and return the failures found.
    /// An empty result means the adapter is fully operable.
    pub async fn test(&self) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        match self.cloud.get_user().await {
            Ok(user) if user.space_max > 0 => {
                let used_fraction = user.space_used as f64 / user.space_max as f64;
                if used_fraction >= QUOTA_WARNING_THRESHOLD {
                    failures.push(ValidationFailure::warning(
                        ValidationField::Email,
                        format!("Seedr storage is {:.0}% full", used_fraction * 100.0),
                    ));
                }
            }
            Ok(_) => {}
            Err(CloudError::AuthFailure) => {
                failures.push(ValidationFailure::error(ValidationField::Email, "seedr authentication failed"));
            }
            Err(err) => {
                failures.push(ValidationFailure::error(ValidationField::Email, err.to_string()));
            }
        }

        if let Err(err) = self.disk.validate_download_directory(&self.settings.download_directory).await {
            failures.push(ValidationFailure::error(ValidationField::DownloadDirectory, err.to_string()));
        }

        if self.multi_tenancy_configured() {
            if let Some(message) = self.ownership.test_connection().await {
                failures.push(ValidationFailure::error(ValidationField::Redis, message));
            }
        } else if self.settings.shared_account {
            failures.push(ValidationFailure::warning(
                ValidationField::Redis,
                "shared account is enabled but no registry is configured",
            ));
        }

        failures
    }
}

use tracing::info;

use vacpoints_core::settings::Profile;
use vacpoints_ports::outbound::SettingsRepository;

use crate::error::AppError;

pub struct SettingsService<S>
where
    S: SettingsRepository,
{
    profiles: S,
}

impl<S> SettingsService<S>
where
    S: SettingsRepository,
{
    pub fn new(profiles: S) -> Self {
        Self { profiles }
    }

    /// Stored profile, or the house defaults when `name` was never saved.
    pub async fn load(&self, name: &str) -> Result<Profile, AppError> {
        Ok(self
            .profiles
            .load_profile(name)
            .await?
            .unwrap_or_default())
    }

    pub async fn save(&self, name: &str, profile: Profile) -> Result<Profile, AppError> {
        let profile = profile.normalized();
        self.profiles.save_profile(name, &profile).await?;
        info!(profile = name, "settings saved");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockSettingsRepo;
    use rust_decimal_macros::dec;
    use vacpoints_core::quote::Tier;

    fn make_service() -> SettingsService<MockSettingsRepo> {
        SettingsService::new(MockSettingsRepo::default())
    }

    #[tokio::test]
    async fn unknown_profile_loads_defaults() {
        let svc = make_service();
        let profile = svc.load("front-desk").await.unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[tokio::test]
    async fn save_rounds_rates_and_persists() {
        let svc = make_service();
        let profile = Profile {
            renter_rate: dec!(0.919),
            discount_tier: Tier::Presidential,
            ..Profile::default()
        };
        let saved = svc.save("front-desk", profile).await.unwrap();
        assert_eq!(saved.renter_rate, dec!(0.92));

        let loaded = svc.load("front-desk").await.unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.discount_tier, Tier::Presidential);
    }
}

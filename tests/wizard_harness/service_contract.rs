//! Contract tests every `OnboardingService` implementation must pass
//!
//! The factory expression must produce a fresh, accept-all service.
//!
//! ```rust,ignore
//! onboarding_service_tests!(InMemoryOnboardingService::new());
//! ```

#[macro_export]
macro_rules! onboarding_service_tests {
    ($factory:expr) => {
        mod onboarding_service_contract_tests {
            use super::*;
            use onboard::onboarding::{OnboardingFormData, OnboardingService, OnboardingStep};
            use serde_json::json;

            // ==================================================================
            // Step validation
            // ==================================================================

            #[tokio::test]
            async fn test_accepts_every_step() {
                let service = $factory;
                for step in OnboardingStep::ALL {
                    let response = service
                        .validate_step(step, json!({ "step": step.number() }))
                        .await
                        .unwrap();
                    assert!(response.success, "step {} rejected", step);
                    assert!(response.error.is_none());
                }
            }

            #[tokio::test]
            async fn test_payload_with_unexpected_keys_is_accepted() {
                let service = $factory;
                let response = service
                    .validate_step(OnboardingStep::Address, json!({ "unknown": true }))
                    .await
                    .unwrap();
                assert!(response.success);
            }

            // ==================================================================
            // Completion
            // ==================================================================

            #[tokio::test]
            async fn test_completes_default_data() {
                let service = $factory;
                let response = service
                    .complete_onboarding(&OnboardingFormData::default())
                    .await
                    .unwrap();
                assert!(response.success);
            }

            #[tokio::test]
            async fn test_completes_filled_data() {
                let service = $factory;
                let data = OnboardingFormData {
                    personal_info: valid_personal_info(),
                    address: valid_address(),
                    merchant_info: valid_merchant_info(),
                    merchant_address: valid_merchant_address(),
                    ..Default::default()
                };
                let response = service.complete_onboarding(&data).await.unwrap();
                assert!(response.success);
            }
        }
    };
}

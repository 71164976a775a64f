//! Router integration tests
//!
//! Covers deployment selection, cooldown/fallback behavior, and round-robin
//! distribution against the concrete `Router` implementation.

#[cfg(test)]
mod tests {
    use litellm_rs::core::providers::Provider;
    use litellm_rs::core::providers::openai::OpenAIProvider;
    use litellm_rs::core::router::{Deployment, DeploymentConfig, Router, RouterConfig, RoutingStrategy};
    use std::collections::HashMap;

    async fn test_provider() -> Provider {
        Provider::OpenAI(
            OpenAIProvider::with_api_key("sk-test-key-for-testing")
                .await
                .expect("failed to build test provider"),
        )
    }

    async fn deployment(id: &str, model_name: &str, weight: u32) -> Deployment {
        let provider = test_provider().await;
        Deployment::new(
            id.to_string(),
            provider,
            format!("{model_name}-internal"),
            model_name.to_string(),
        )
        .with_config(DeploymentConfig {
            weight,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn selects_among_deployments_for_model() {
        let router = Router::default();
        router.add_deployment(deployment("d1", "gpt-4", 1).await);
        router.add_deployment(deployment("d2", "gpt-4", 1).await);

        let selected = router.select_deployment("gpt-4").expect("selection should succeed");
        assert!(selected == "d1" || selected == "d2");
    }

    #[tokio::test]
    async fn errors_when_no_deployments_for_model() {
        let router = Router::default();
        let result = router.select_deployment("gpt-4");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn alias_resolves_to_underlying_model() {
        let router = Router::default();
        router.add_deployment(deployment("d1", "gpt-4", 1).await);
        router.add_model_alias("gpt4", "gpt-4");

        assert_eq!(router.resolve_model_name("gpt4"), "gpt-4");
        assert_eq!(router.get_deployments_for_model("gpt4"), vec!["d1".to_string()]);
    }

    #[tokio::test]
    async fn repeated_failures_enter_cooldown() {
        let config = RouterConfig {
            allowed_fails: 2,
            cooldown_time_secs: 30,
            ..Default::default()
        };
        let router = Router::new(config);
        router.add_deployment(deployment("d1", "gpt-4", 1).await);

        assert!(router.get_healthy_deployments("gpt-4").contains(&"d1".to_string()));

        router.record_failure("d1");
        router.record_failure("d1");

        assert!(!router.get_healthy_deployments("gpt-4").contains(&"d1".to_string()));
    }

    #[tokio::test]
    async fn success_does_not_trigger_cooldown() {
        let router = Router::default();
        router.add_deployment(deployment("d1", "gpt-4", 1).await);

        router.record_success("d1", 100, 50_000);

        assert!(router.get_healthy_deployments("gpt-4").contains(&"d1".to_string()));
    }

    #[tokio::test]
    async fn round_robin_cycles_through_all_deployments() {
        let config = RouterConfig {
            routing_strategy: RoutingStrategy::RoundRobin,
            ..Default::default()
        };
        let router = Router::new(config);
        router.add_deployment(deployment("d1", "gpt-4", 1).await);
        router.add_deployment(deployment("d2", "gpt-4", 1).await);
        router.add_deployment(deployment("d3", "gpt-4", 1).await);

        let mut seen: HashMap<String, u32> = HashMap::new();
        for _ in 0..9 {
            let id = router.select_deployment("gpt-4").unwrap();
            *seen.entry(id).or_default() += 1;
        }

        assert_eq!(seen.len(), 3, "round robin should visit every deployment");
        for count in seen.values() {
            assert_eq!(*count, 3, "round robin should distribute evenly over full cycles");
        }
    }

    #[tokio::test]
    async fn weighted_selection_favors_higher_weight_over_many_draws() {
        let router = Router::default();
        router.add_deployment(deployment("low", "gpt-4", 1).await);
        router.add_deployment(deployment("high", "gpt-4", 9).await);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..500 {
            let id = router.select_deployment("gpt-4").unwrap();
            *counts.entry(id).or_default() += 1;
        }

        let high = *counts.get("high").unwrap_or(&0);
        let low = *counts.get("low").unwrap_or(&0);
        assert!(high > low, "deployment with weight 9 should be picked far more than weight 1");
    }

    #[tokio::test]
    async fn remove_deployment_drops_it_from_model_index() {
        let router = Router::default();
        router.add_deployment(deployment("d1", "gpt-4", 1).await);

        assert!(router.remove_deployment("d1").is_some());
        assert!(router.get_deployments_for_model("gpt-4").is_empty());
    }
}

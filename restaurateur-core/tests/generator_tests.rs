//! End-to-end generator tests against the fake provider.

use std::sync::Arc;

use restaurateur_core::llm::RetryingProvider;
use restaurateur_core::{
    AppConfig, Cuisine, Dietary, FakeProvider, GenerateError, GenerationParams,
    GenerationRequest, LlmError, MealType, RestaurantGenerator,
};

fn request(cuisine: Cuisine, meal_type: MealType, dietary: Option<Dietary>) -> GenerationRequest {
    GenerationRequest::new(cuisine, meal_type, dietary)
}

#[tokio::test]
async fn every_valid_combination_yields_three_non_empty_fields() {
    let provider = Arc::new(FakeProvider::with_restaurant_responses());
    let generator =
        RestaurantGenerator::new(provider.clone(), GenerationParams::default()).unwrap();

    let dietary_choices = std::iter::once(None).chain(Dietary::ALL.iter().copied().map(Some));
    let mut runs = 0;
    for dietary in dietary_choices {
        for cuisine in Cuisine::ALL {
            for meal_type in MealType::ALL {
                let idea = generator
                    .generate(&request(*cuisine, *meal_type, dietary))
                    .await
                    .unwrap();
                assert!(!idea.restaurant_name.is_empty());
                assert!(!idea.tagline.is_empty());
                assert!(!idea.menu.is_empty());
                runs += 1;
            }
        }
    }

    assert_eq!(provider.call_count(), runs * 3);
}

#[tokio::test]
async fn sentinel_selections_are_rejected_before_any_call() {
    let provider = Arc::new(FakeProvider::with_restaurant_responses());
    let generator =
        RestaurantGenerator::new(provider.clone(), GenerationParams::default()).unwrap();

    for (cuisine, meal_type) in [("None", "lunch"), ("Indian", "None"), ("", "")] {
        let request = GenerationRequest::from_selections(cuisine, meal_type, "None").unwrap();
        let err = generator.generate(&request).await.unwrap_err();
        assert!(
            matches!(err, GenerateError::InvalidRequest(_)),
            "{} / {} should be invalid, got {:?}",
            cuisine,
            meal_type,
            err
        );
    }

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn menu_failure_returns_no_partial_result() {
    let provider = Arc::new(
        FakeProvider::with_restaurant_responses().fail_on_call(
            3,
            LlmError::RemoteService {
                status: 500,
                message: "model overloaded".to_string(),
            },
        ),
    );
    let generator =
        RestaurantGenerator::new(provider.clone(), GenerationParams::default()).unwrap();

    let result = generator
        .generate(&request(Cuisine::French, MealType::Dinner, None))
        .await;

    match result {
        Err(GenerateError::Llm(LlmError::RemoteService { status, .. })) => assert_eq!(status, 500),
        other => panic!("expected remote service error, got {:?}", other),
    }
}

#[tokio::test]
async fn transient_failure_is_retried_through_the_generator() {
    let fake = FakeProvider::with_restaurant_responses()
        .fail_on_call(2, LlmError::Transport("connection reset".to_string()));
    let provider = Arc::new(
        RetryingProvider::new(fake, 1).with_backoff(std::time::Duration::ZERO),
    );
    let generator =
        RestaurantGenerator::new(provider.clone(), GenerationParams::default()).unwrap();

    let idea = generator
        .generate(&request(Cuisine::Mexican, MealType::Lunch, Some(Dietary::Vegan)))
        .await
        .unwrap();

    assert_eq!(idea.tagline, "Where every spice tells a story.");
    assert_eq!(provider.inner().call_count(), 4);
}

#[tokio::test]
async fn fake_provider_from_config_runs_offline() {
    let config = AppConfig::from_lookup(|var| {
        (var == "RESTAURATEUR_PROVIDER").then(|| "fake".to_string())
    })
    .unwrap();
    let generator =
        RestaurantGenerator::new(config.build_provider().unwrap(), config.generation_params())
            .unwrap();

    let idea = generator
        .generate(&request(Cuisine::Korean, MealType::Appetizer, None))
        .await
        .unwrap();

    assert_eq!(idea.restaurant_name, "Saffron Court");
}

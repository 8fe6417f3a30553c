mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn every_recipe_route_requires_a_token() -> Result<()> {
    let server = common::start_server().await?;
    let owner = server.seed_user("caleb").await?;
    let recipe = server.seed_recipe(&owner, common::example_params()).await?;
    let item = format!("/recipes/{}", recipe.id);

    let routes = [
        (Method::GET, "/recipes".to_string()),
        (Method::POST, "/recipes".to_string()),
        (Method::GET, item.clone()),
        (Method::PATCH, item.clone()),
        (Method::DELETE, item.clone()),
    ];

    for (method, path) in routes {
        let res = server
            .client
            .request(method.clone(), server.url(&path))
            .json(&json!({ "recipe": common::example_params() }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {} without a token", method, path);
    }

    // nothing was touched
    assert_eq!(server.state.recipes.find_by_id(recipe.id).await?, recipe);
    assert_eq!(server.state.recipes.find_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_token_is_rejected() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .client
        .get(server.url("/recipes"))
        .bearer_auth("notarealtoken")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn legacy_token_header_is_accepted() -> Result<()> {
    let server = common::start_server().await?;
    let user = server.seed_user("caleb").await?;

    let res = server
        .client
        .get(server.url("/recipes"))
        .header("Authorization", format!("Token token={}", user.token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn non_owner_is_indistinguishable_from_bad_token() -> Result<()> {
    let server = common::start_server().await?;
    let owner = server.seed_user("caleb").await?;
    let intruder = server.seed_user("mallory").await?;
    let recipe = server.seed_recipe(&owner, common::example_params()).await?;
    let url = server.url(&format!("/recipes/{}", recipe.id));

    let as_intruder = server.client.delete(&url).bearer_auth(&intruder.token).send().await?;
    let as_stranger = server.client.delete(&url).bearer_auth("notarealtoken").send().await?;

    assert_eq!(as_intruder.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(as_stranger.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        as_intruder.json::<serde_json::Value>().await?,
        as_stranger.json::<serde_json::Value>().await?
    );
    Ok(())
}

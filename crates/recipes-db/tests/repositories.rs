//! Repository integration tests against a real Postgres schema.

use recipes_db::models::ingredient::{CreateIngredient, IngredientFilter};
use recipes_db::models::recipe::{
    CreateRecipe, RecipeFilter, RecipeIngredientInput, UpdateRecipe,
};
use recipes_db::models::user::CreateUser;
use recipes_db::models::user_recipe::{UpdateUserRecipe, UpsertUserRecipe};
use recipes_db::repositories::{IngredientRepo, RecipeRepo, UserRecipeRepo, UserRepo};
use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::roles::ROLE_ADMIN;
use tracker_core::types::DbId;

async fn seed_admin(pool: &PgPool) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "chef@example.com".to_string(),
            name: "Chef".to_string(),
            password_hash: "x".to_string(),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_ingredient(pool: &PgPool, name: &str, category: &str) -> DbId {
    IngredientRepo::create(
        pool,
        &CreateIngredient {
            name: name.to_string(),
            category: category.to_string(),
            unit: "pcs".to_string(),
            description: None,
            calories_per_unit: None,
            image: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn recipe_input(title: &str, ingredient_ids: &[DbId]) -> CreateRecipe {
    CreateRecipe {
        title: title.to_string(),
        description: "A dish".to_string(),
        cooking_time: 30,
        difficulty: "easy".to_string(),
        instructions: vec!["Chop".to_string(), "Cook".to_string()],
        image_url: None,
        ingredients: ingredient_ids
            .iter()
            .map(|&id| RecipeIngredientInput {
                ingredient_id: id,
                quantity: 1.0,
                note: None,
            })
            .collect(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn ingredient_search_matches_name_and_description(pool: PgPool) {
    let tomato = IngredientRepo::create(
        &pool,
        &CreateIngredient {
            name: "Tomato".to_string(),
            category: "vegetable".to_string(),
            unit: "g".to_string(),
            description: Some("Red and juicy".to_string()),
            calories_per_unit: Some(0.18),
            image: Some("https://example.com/tomato.png".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(tomato.unit, "g");
    assert_eq!(tomato.calories_per_unit, Some(0.18));
    assert_eq!(tomato.image.as_deref(), Some("https://example.com/tomato.png"));
    seed_ingredient(&pool, "Basil", "herb").await;

    let filter = IngredientFilter {
        search: Some("juicy".to_string()),
        ..Default::default()
    };
    let (items, total) = IngredientRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Tomato");

    let filter = IngredientFilter {
        category: Some("herb".to_string()),
        search: None,
    };
    let (items, _) = IngredientRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(items[0].name, "Basil");
}

#[sqlx::test(migrations = "./migrations")]
async fn recipe_create_persists_lines_and_instructions(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let tomato = seed_ingredient(&pool, "Tomato", "vegetable").await;
    let basil = seed_ingredient(&pool, "Basil", "herb").await;

    let mut input = recipe_input("Bruschetta", &[tomato, basil]);
    input.ingredients[0].note = Some("diced".to_string());
    let recipe = RecipeRepo::create(&pool, owner, &input).await.unwrap();

    assert_eq!(recipe.instructions.0, vec!["Chop", "Cook"]);

    let lines = RecipeRepo::ingredients_for(&pool, recipe.id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].name, "Tomato");
    assert_eq!(lines[0].category, "vegetable");
    // Unit comes from the catalog row, the note from the line itself.
    assert_eq!(lines[0].unit, "pcs");
    assert_eq!(lines[0].note.as_deref(), Some("diced"));
    assert!(lines[1].note.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn recipe_list_filters_conjunctively(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let tomato = seed_ingredient(&pool, "Tomato", "vegetable").await;
    let beef = seed_ingredient(&pool, "Beef", "meat").await;

    let mut quick = recipe_input("Salad", &[tomato]);
    quick.cooking_time = 10;
    RecipeRepo::create(&pool, owner, &quick).await.unwrap();

    let mut slow = recipe_input("Stew", &[beef]);
    slow.cooking_time = 120;
    slow.difficulty = "hard".to_string();
    RecipeRepo::create(&pool, owner, &slow).await.unwrap();

    let filter = RecipeFilter {
        max_time: Some(30),
        ..Default::default()
    };
    let (items, total) = RecipeRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Salad");

    let filter = RecipeFilter {
        category: Some("meat".to_string()),
        ..Default::default()
    };
    let (items, _) = RecipeRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(items[0].title, "Stew");

    // Any-match on ingredient ids.
    let filter = RecipeFilter {
        ingredient_ids: Some(vec![tomato, beef]),
        ..Default::default()
    };
    let (_, total) = RecipeRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_ingredients_requires_every_queried_id(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let a = seed_ingredient(&pool, "Tomato", "vegetable").await;
    let b = seed_ingredient(&pool, "Basil", "herb").await;
    let c = seed_ingredient(&pool, "Mozzarella", "dairy").await;

    RecipeRepo::create(&pool, owner, &recipe_input("Both", &[a, b]))
        .await
        .unwrap();
    RecipeRepo::create(&pool, owner, &recipe_input("Superset", &[a, b, c]))
        .await
        .unwrap();
    RecipeRepo::create(&pool, owner, &recipe_input("Only one", &[a]))
        .await
        .unwrap();

    let found = RecipeRepo::find_by_ingredients(&pool, &[a, b], None, None, None)
        .await
        .unwrap();

    // Exact match and superset qualify; the partial overlap does not.
    let titles: Vec<_> = found.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(found.len(), 2);
    assert!(titles.contains(&"Both"));
    assert!(titles.contains(&"Superset"));

    // Duplicate query ids must not change the required cardinality.
    let found = RecipeRepo::find_by_ingredients(&pool, &[a, a, b], None, None, None)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    // Narrowing filters apply on top.
    let found = RecipeRepo::find_by_ingredients(&pool, &[a, b], Some(5), None, None)
        .await
        .unwrap();
    assert!(found.is_empty());

    // An empty id list drops the ingredient constraint entirely.
    let found = RecipeRepo::find_by_ingredients(&pool, &[], None, None, None)
        .await
        .unwrap();
    assert_eq!(found.len(), 3);
    let found = RecipeRepo::find_by_ingredients(&pool, &[], None, None, Some("dairy"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Superset");
}

#[sqlx::test(migrations = "./migrations")]
async fn recipe_update_replaces_the_line_set(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let tomato = seed_ingredient(&pool, "Tomato", "vegetable").await;
    let basil = seed_ingredient(&pool, "Basil", "herb").await;

    let recipe = RecipeRepo::create(&pool, owner, &recipe_input("Salad", &[tomato]))
        .await
        .unwrap();

    let update = UpdateRecipe {
        title: None,
        description: None,
        cooking_time: Some(15),
        difficulty: None,
        instructions: None,
        image_url: None,
        ingredients: Some(vec![RecipeIngredientInput {
            ingredient_id: basil,
            quantity: 2.0,
            note: None,
        }]),
    };
    let updated = RecipeRepo::update(&pool, recipe.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Salad");
    assert_eq!(updated.cooking_time, 15);

    let lines = RecipeRepo::ingredients_for(&pool, recipe.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].name, "Basil");
}

#[sqlx::test(migrations = "./migrations")]
async fn referenced_ingredients_report_their_reference_count(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let tomato = seed_ingredient(&pool, "Tomato", "vegetable").await;

    assert_eq!(IngredientRepo::reference_count(&pool, tomato).await.unwrap(), 0);

    RecipeRepo::create(&pool, owner, &recipe_input("Salad", &[tomato]))
        .await
        .unwrap();
    let recipe = RecipeRepo::create(&pool, owner, &recipe_input("Soup", &[tomato]))
        .await
        .unwrap();

    assert_eq!(IngredientRepo::reference_count(&pool, tomato).await.unwrap(), 2);

    // Deleting a recipe cascades its lines, freeing the ingredient.
    RecipeRepo::delete(&pool, recipe.id).await.unwrap();
    assert_eq!(IngredientRepo::reference_count(&pool, tomato).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn user_recipe_upsert_and_completion_toggle(pool: PgPool) {
    let owner = seed_admin(&pool).await;
    let tomato = seed_ingredient(&pool, "Tomato", "vegetable").await;
    let recipe = RecipeRepo::create(&pool, owner, &recipe_input("Salad", &[tomato]))
        .await
        .unwrap();

    let first = UserRecipeRepo::upsert(
        &pool,
        owner,
        &UpsertUserRecipe {
            recipe_id: recipe.id,
            checklist: vec!["Chop".to_string()],
            notes: None,
        },
    )
    .await
    .unwrap();

    // Re-tracking replaces checklist and notes, keeps the row.
    let second = UserRecipeRepo::upsert(
        &pool,
        owner,
        &UpsertUserRecipe {
            recipe_id: recipe.id,
            checklist: vec!["Chop".to_string(), "Cook".to_string()],
            notes: Some("double the basil".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.checklist.0.len(), 2);

    // Toggle completion, then filter by it.
    let updated = UserRecipeRepo::update(
        &pool,
        owner,
        recipe.id,
        &UpdateUserRecipe {
            checklist: None,
            notes: None,
            is_completed: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.is_completed);
    assert_eq!(updated.notes.as_deref(), Some("double the basil"));

    let done = UserRecipeRepo::list_for_user(&pool, owner, Some(true))
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    let open = UserRecipeRepo::list_for_user(&pool, owner, Some(false))
        .await
        .unwrap();
    assert!(open.is_empty());

    assert!(UserRecipeRepo::delete(&pool, owner, recipe.id).await.unwrap());
    assert!(UserRecipeRepo::find(&pool, owner, recipe.id).await.unwrap().is_none());
}

use storefront_api::{
    clients::{products, users},
    config::{AppConfig, StoreLocation},
    models::{Product, RecordId, Role, User},
    services::auth_service::hash_password,
    store::{HttpBackend, Resource, Store},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let StoreLocation::Remote(base_url) = &config.store else {
        anyhow::bail!("seed needs STORE_BASE_URL to point at a REST store");
    };
    let store = Store::new(HttpBackend::new(base_url, config.store_timeout)?);

    let admin_id = ensure_user(&store, "admin", "admin@zeyora.in", "admin123", Role::Admin).await?;
    let user_id = ensure_user(&store, "shopper", "user@zeyora.in", "user123", Role::User).await?;
    seed_products(&store).await?;
    seed_ads(&store).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    store: &Store,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<RecordId> {
    if let Some(existing) = users::find_by_email(store, email).await?.into_iter().next() {
        println!("User {email} already present");
        return Ok(existing.id);
    }

    let user = User {
        id: RecordId::new(Uuid::new_v4().to_string()),
        username: username.to_string(),
        email: email.to_string(),
        password: hash_password(password)?,
        role,
        active: true,
        wishlist: Vec::new(),
        orders: Vec::new(),
    };
    let user = users::create(store, &user).await?;

    println!("Created user {email} (role={})", role.as_str());
    Ok(user.id)
}

async fn seed_products(store: &Store) -> anyhow::Result<()> {
    let catalog = [
        ("Oud Royale", "Zeyora", "India", "Attar", 7200, 8500, 12, 14),
        ("Musk Al Tahara", "Zeyora", "UAE", "Attar", 950, 1200, 6, 40),
        ("Vanilla Dusk", "Maison Lune", "France", "Eau de Parfum", 4600, 5200, 50, 8),
        ("Amber Nights", "Zeyora", "India", "Attar", 1800, 2100, 12, 3),
        ("Rose Taifi", "Al Haramain", "Saudi Arabia", "Attar", 2600, 3000, 12, 0),
        ("Jasmin Sambac", "Maison Lune", "France", "Eau de Toilette", 3900, 4500, 100, 22),
    ];

    let existing: Vec<String> = products::list(store)
        .await?
        .into_iter()
        .map(|p| p.name.to_lowercase())
        .collect();

    for (offset, (name, brand, origin, kind, price, mrp, size_ml, stock)) in
        catalog.into_iter().enumerate()
    {
        if existing.contains(&name.to_lowercase()) {
            continue;
        }
        let product = Product {
            id: RecordId::new((chrono::Utc::now().timestamp_millis() + offset as i64).to_string()),
            name: name.to_string(),
            brand: brand.to_string(),
            origin: origin.to_string(),
            kind: kind.to_string(),
            price,
            mrp,
            size_ml,
            stock,
            img: String::new(),
            description: format!("{kind} from {origin}"),
            review: Vec::new(),
        };
        products::create(store, &product).await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_ads(store: &Store) -> anyhow::Result<()> {
    let ads: Vec<serde_json::Value> = store.list(Resource::Ads, &[]).await?;
    if !ads.is_empty() {
        return Ok(());
    }
    let banner = serde_json::json!({
        "img": "/banners/festive.jpg",
        "title": "Festive attars",
        "link": "/shop"
    });
    let _: serde_json::Value = store.create(Resource::Ads, &banner).await?;

    println!("Seeded ads");
    Ok(())
}

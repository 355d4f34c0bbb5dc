//! Common Test Utilities
//!
//! In-memory repositories and a test server wired with the real services.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use parking_lot::Mutex;
use serde_json::{json, Value};

use pet_registry::application::dto::{TokenResponse, UserInfoDto};
use pet_registry::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings, SnowflakeSettings,
    UploadSettings,
};
use pet_registry::domain::{
    DeletedUser, Feature, FeatureProperty, FeaturePropertyRepository, FeatureRepository,
    FeatureView, NewSocialNetworkLink, Pet, PetAttachments, PetImage, PetImageRepository,
    PetRepository,
    Repositories, Role, SocialNetwork, SocialNetworkLink, SocialNetworkRepository, User,
    UserRepository,
};
use pet_registry::shared::error::AppError;
use pet_registry::startup::{build_router, AppState};

pub const PASSWORD: &str = "password123";
pub const MAX_IMAGE_BYTES: usize = 1024;

#[derive(Clone, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    deleted_users: Vec<DeletedUser>,
    pets: BTreeMap<i64, Pet>,
    /// (pet_id, user_id)
    owners: Vec<(i64, i64)>,
    images: HashMap<i64, PetImage>,
    features: Vec<Feature>,
    properties: Vec<FeatureProperty>,
    networks: Vec<SocialNetwork>,
    links: BTreeMap<(i64, i64), String>,
    /// Make every non-empty feature insert fail
    fail_feature_writes: bool,
}

impl Store {
    fn remove_pet(&mut self, pet_id: i64) {
        self.pets.remove(&pet_id);
        self.owners.retain(|(p, _)| *p != pet_id);
        self.images.remove(&pet_id);
        self.features.retain(|f| f.pet_id != pet_id);
    }

    fn is_orphan(&self, pet_id: i64) -> bool {
        !self.owners.iter().any(|(p, _)| *p == pet_id)
    }

    fn write_attachments(&mut self, attachments: &PetAttachments) -> Result<(), AppError> {
        if let Some(image) = &attachments.image {
            self.images.insert(image.pet_id, image.clone());
        }
        if attachments.features.is_empty() {
            return Ok(());
        }
        if self.fail_feature_writes {
            return Err(AppError::Internal("feature insert failed".into()));
        }
        for feature in &attachments.features {
            if !self.properties.iter().any(|p| p.id == feature.property_id) {
                return Err(AppError::Internal("feature property does not exist".into()));
            }
        }
        self.features.extend_from_slice(&attachments.features);
        Ok(())
    }

    fn replace_links(&mut self, user_id: i64, links: &[NewSocialNetworkLink]) {
        self.links.retain(|(u, _), _| *u != user_id);
        for link in links {
            self.links
                .insert((user_id, link.social_network_id), link.link.clone());
        }
    }

    fn update_user(&mut self, user: &User) -> Result<User, AppError> {
        match self.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(AppError::NotFound("User not found".into())),
        }
    }
}

/// Every repository port over one shared map, with the same cascades and
/// unique keys as the PostgreSQL schema.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryStore {
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut s = store.inner.lock();
            s.properties = ["Allergy", "Chronic disease", "Special signs", "Character", "Diet"]
                .iter()
                .zip(1..)
                .map(|(name, id)| FeatureProperty {
                    id,
                    name: (*name).to_string(),
                })
                .collect();
            s.networks = ["Telegram", "VK", "WhatsApp"]
                .iter()
                .zip(1..)
                .map(|(title, id)| SocialNetwork {
                    id,
                    title: (*title).to_string(),
                })
                .collect();
        }
        store
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            pets: Arc::new(self.clone()),
            pet_images: Arc::new(self.clone()),
            features: Arc::new(self.clone()),
            feature_properties: Arc::new(self.clone()),
            social_networks: Arc::new(self.clone()),
        }
    }

    pub fn deleted_users(&self) -> Vec<DeletedUser> {
        self.inner.lock().deleted_users.clone()
    }

    pub fn pet_count(&self) -> usize {
        self.inner.lock().pets.len()
    }

    pub fn owner_link_count(&self) -> usize {
        self.inner.lock().owners.len()
    }

    pub fn image_count(&self) -> usize {
        self.inner.lock().images.len()
    }

    pub fn promote_to_admin(&self, user_id: i64) {
        if let Some(user) = self.inner.lock().users.get_mut(&user_id) {
            user.role = Role::Admin;
        }
    }

    pub fn fail_feature_writes(&self) {
        self.inner.lock().fail_feature_writes = true;
    }

    /// Run `f` against a copy of the store and keep the copy only when `f`
    /// succeeds, like a committed transaction.
    fn atomically<T>(
        &self,
        f: impl FnOnce(&mut Store) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut s = self.inner.lock();
        let mut staged = s.clone();
        let result = f(&mut staged)?;
        *s = staged;
        Ok(result)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.inner.lock().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User, links: &[NewSocialNetworkLink]) -> Result<User, AppError> {
        self.atomically(|s| {
            if s.users.values().any(|u| u.email == user.email) {
                return Err(AppError::Conflict("User already exists".into()));
            }
            s.users.insert(user.id, user.clone());
            s.replace_links(user.id, links);
            Ok(user.clone())
        })
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        self.atomically(|s| s.update_user(user))
    }

    async fn update_with_links(
        &self,
        user: &User,
        links: &[NewSocialNetworkLink],
    ) -> Result<User, AppError> {
        self.atomically(|s| {
            let user = s.update_user(user)?;
            s.replace_links(user.id, links);
            Ok(user)
        })
    }

    async fn delete(&self, tombstone: &DeletedUser) -> Result<u64, AppError> {
        self.atomically(|s| {
            let user_id = tombstone.user_id;
            s.deleted_users.push(tombstone.clone());

            let sole: Vec<i64> = s
                .owners
                .iter()
                .filter(|(_, u)| *u == user_id)
                .map(|(p, _)| *p)
                .filter(|p| !s.owners.iter().any(|(q, u)| q == p && *u != user_id))
                .collect();
            for pet_id in &sole {
                s.remove_pet(*pet_id);
            }

            if s.users.remove(&user_id).is_none() {
                return Err(AppError::NotFound("User not found".into()));
            }
            s.owners.retain(|(_, u)| *u != user_id);
            s.features.retain(|f| f.user_id != user_id);
            s.links.retain(|(u, _), _| *u != user_id);
            Ok(sole.len() as u64)
        })
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Pet>, AppError> {
        Ok(self.inner.lock().pets.get(&id).cloned())
    }

    async fn find_by_chip_id(&self, chip_id: &str) -> Result<Option<Pet>, AppError> {
        Ok(self
            .inner
            .lock()
            .pets
            .values()
            .find(|p| p.chip_id == chip_id)
            .cloned())
    }

    async fn find_by_stamp_id(&self, stamp_id: &str) -> Result<Option<Pet>, AppError> {
        Ok(self
            .inner
            .lock()
            .pets
            .values()
            .find(|p| p.stamp_id == stamp_id)
            .cloned())
    }

    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Pet>, AppError> {
        let s = self.inner.lock();
        Ok(s.pets
            .values()
            .filter(|p| s.owners.contains(&(p.id, user_id)))
            .cloned()
            .collect())
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Pet>, AppError> {
        Ok(self
            .inner
            .lock()
            .pets
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.lock().pets.len() as i64)
    }

    async fn create(
        &self,
        pet: &Pet,
        owner_id: i64,
        attachments: &PetAttachments,
    ) -> Result<Pet, AppError> {
        self.atomically(|s| {
            if s
                .pets
                .values()
                .any(|p| p.chip_id == pet.chip_id || p.stamp_id == pet.stamp_id)
            {
                return Err(AppError::Conflict("Pet already exists".into()));
            }
            s.pets.insert(pet.id, pet.clone());
            s.owners.push((pet.id, owner_id));
            s.write_attachments(attachments)?;
            Ok(pet.clone())
        })
    }

    async fn update(&self, pet: &Pet, attachments: &PetAttachments) -> Result<Pet, AppError> {
        self.atomically(|s| {
            match s.pets.get_mut(&pet.id) {
                Some(existing) => *existing = pet.clone(),
                None => return Err(AppError::NotFound("Pet not found".into())),
            }
            s.write_attachments(attachments)?;
            Ok(pet.clone())
        })
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.inner.lock().remove_pet(id);
        Ok(())
    }

    async fn detach_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError> {
        self.atomically(|s| {
            s.owners.retain(|link| *link != (pet_id, user_id));
            let orphaned = s.pets.contains_key(&pet_id) && s.is_orphan(pet_id);
            if orphaned {
                s.remove_pet(pet_id);
            }
            Ok(orphaned)
        })
    }

    async fn find_owners(&self, pet_id: i64) -> Result<Vec<User>, AppError> {
        let s = self.inner.lock();
        Ok(s.owners
            .iter()
            .filter(|(p, _)| *p == pet_id)
            .filter_map(|(_, u)| s.users.get(u).cloned())
            .collect())
    }

    async fn is_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().owners.contains(&(pet_id, user_id)))
    }
}

#[async_trait]
impl PetImageRepository for InMemoryStore {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Option<PetImage>, AppError> {
        Ok(self.inner.lock().images.get(&pet_id).cloned())
    }
}

#[async_trait]
impl FeatureRepository for InMemoryStore {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<FeatureView>, AppError> {
        let s = self.inner.lock();
        Ok(s.features
            .iter()
            .filter(|f| f.pet_id == pet_id)
            .map(|f| FeatureView {
                id: f.id,
                property_id: f.property_id,
                property_name: s
                    .properties
                    .iter()
                    .find(|p| p.id == f.property_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                user_id: f.user_id,
                description: f.description.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl FeaturePropertyRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<FeatureProperty>, AppError> {
        Ok(self.inner.lock().properties.clone())
    }
}

#[async_trait]
impl SocialNetworkRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<SocialNetwork>, AppError> {
        Ok(self.inner.lock().networks.clone())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<SocialNetworkLink>, AppError> {
        let s = self.inner.lock();
        Ok(s.links
            .iter()
            .filter(|((u, _), _)| *u == user_id)
            .filter_map(|((_, network_id), link)| {
                s.networks
                    .iter()
                    .find(|n| n.id == *network_id)
                    .map(|n| SocialNetworkLink {
                        social_network_id: n.id,
                        title: n.title.clone(),
                        link: link.clone(),
                    })
            })
            .collect())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-that-is-long-enough".into(),
            access_token_expiry_minutes: 60,
        },
        snowflake: SnowflakeSettings { machine_id: 1 },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".into()],
        },
        uploads: UploadSettings {
            default_pet_image_name: "default_pet.png".into(),
            max_image_bytes: MAX_IMAGE_BYTES,
        },
        environment: "test".into(),
    }
}

/// A registered account with a fresh access token
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Test application: the real router over in-memory repositories
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::seeded();
        let state = AppState::new(test_settings(), store.repositories(), None);
        let server = TestServer::new(build_router(state)).expect("test server");

        Self { server, store }
    }

    pub async fn register(&self, email: &str) -> TestResponse {
        self.server
            .post("/api/v1/auth/register")
            .json(&registration(email))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await
    }

    /// Register `email` and log in.
    pub async fn user(&self, email: &str) -> TestUser {
        let info: UserInfoDto = self.register(email).await.json();
        let tokens: TokenResponse = self.login(email, PASSWORD).await.json();

        TestUser {
            id: info.user_id.parse().expect("numeric user id"),
            email: email.to_string(),
            token: tokens.access_token,
        }
    }

    /// Register `email`, grant it the admin role and log in.
    pub async fn admin(&self, email: &str) -> TestUser {
        let info: UserInfoDto = self.register(email).await.json();
        let id = info.user_id.parse().expect("numeric user id");
        self.store.promote_to_admin(id);
        let tokens: TokenResponse = self.login(email, PASSWORD).await.json();

        TestUser {
            id,
            email: email.to_string(),
            token: tokens.access_token,
        }
    }

    /// Register a pet for `owner` through the multipart form.
    pub async fn create_pet(&self, owner: &TestUser, pet: Value) -> TestResponse {
        self.server
            .post("/api/v1/pets")
            .authorization_bearer(&owner.token)
            .multipart(pet_form(pet))
            .await
    }
}

pub fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "phone_number": "+70001110000",
        "first_name": "John",
        "password": PASSWORD,
        "has_permit_to_show_email": true,
        "has_permit_to_show_phone_number": false,
        "social_networks": [
            { "social_network_id": 1, "link": "https://t.me/john" }
        ]
    })
}

pub fn pet_json(chip_id: &str, stamp_id: &str) -> Value {
    json!({
        "chip_id": chip_id,
        "stamp_id": stamp_id,
        "name": "Pancake",
        "type": "Cat",
        "breed": "Unknown",
        "sex": "female"
    })
}

pub fn pet_form(pet: Value) -> MultipartForm {
    MultipartForm::new().add_text("pet", pet.to_string())
}

pub fn png_part(data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name("cat.png")
        .mime_type("image/png")
}

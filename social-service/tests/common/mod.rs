#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SigningConfig;
use serde_json::json;
use social_service::domain::auth::service::AuthService;
use social_service::domain::notification::errors::NotificationError;
use social_service::domain::notification::models::EmailMessage;
use social_service::domain::notification::models::GeneratedImage;
use social_service::domain::notification::ports::ImageGenerator;
use social_service::domain::notification::ports::Mailer;
use social_service::domain::notification::service::NotificationService;
use social_service::domain::post::errors::PostError;
use social_service::domain::post::models::Comment;
use social_service::domain::post::models::Like;
use social_service::domain::post::models::Post;
use social_service::domain::post::models::PostId;
use social_service::domain::post::models::PostSorting;
use social_service::domain::post::models::PostWithLikes;
use social_service::domain::post::ports::PostRepository;
use social_service::domain::post::service::PostService;
use social_service::domain::user::errors::UserError;
use social_service::domain::user::models::User;
use social_service::domain::user::ports::UserDirectory;
use social_service::domain::user::ports::UserRepository;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const GENERATED_IMAGE_URL: &str = "https://images.example.com/generated.jpg";

/// Test application that spawns a real server backed by in-memory ports
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Spawn the application with an image generator that always succeeds
    pub async fn spawn() -> Self {
        Self::spawn_with_generator(StubImageGenerator::succeeding()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_generator(generator: StubImageGenerator) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let signing_config = SigningConfig::new(JWT_SECRET, "HS256").unwrap();
        let authenticator = Arc::new(Authenticator::new(&signing_config));
        let users = Arc::new(InMemoryUserRepository::default());
        let posts = Arc::new(InMemoryPostRepository::default());
        let mailer = Arc::new(RecordingMailer::default());

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
            post_service: Arc::new(PostService::new(Arc::clone(&posts))),
            notification_service: Arc::new(NotificationService::new(
                Arc::clone(&mailer),
                Arc::new(generator),
                Arc::clone(&posts),
            )),
            public_url: address.clone(),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
            posts,
            mailer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user through the API
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/token")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the access token
    pub async fn access_token_for(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("No access token in login response")
            .to_string()
    }

    /// Create a post and return its id
    pub async fn create_post(&self, token: &str, body: &str) -> String {
        let body: serde_json::Value = self
            .post_authenticated("/api/posts", token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Wait until at least `count` emails were sent by background tasks
    pub async fn wait_for_emails(&self, count: usize) -> Vec<EmailMessage> {
        for _ in 0..100 {
            let sent = self.mailer.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Expected {} emails, got {}", count, self.mailer.sent().len());
    }
}

/// User repository keyed by email
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn get(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }

    pub fn remove(&self, email: &str) {
        self.users.lock().unwrap().remove(email);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.get(email))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn confirm(&self, email: &str) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;
        user.confirmed = true;
        Ok(user.clone())
    }
}

#[derive(Default)]
struct PostTables {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

impl PostTables {
    fn with_likes(&self, post: &Post) -> PostWithLikes {
        let likes = self.likes.iter().filter(|l| l.post_id == post.id).count() as i64;
        PostWithLikes {
            post: post.clone(),
            likes,
        }
    }
}

/// Post repository holding posts, comments and likes in insertion order
#[derive(Default)]
pub struct InMemoryPostRepository {
    tables: Mutex<PostTables>,
}

impl InMemoryPostRepository {
    pub fn image_url(&self, id: PostId) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.image_url.clone())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, post: Post) -> Result<Post, PostError> {
        self.tables.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_post_with_likes(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.with_likes(p)))
    }

    async fn list_posts_with_likes(
        &self,
        sorting: PostSorting,
    ) -> Result<Vec<PostWithLikes>, PostError> {
        let tables = self.tables.lock().unwrap();
        // Insertion order stands in for creation time.
        let mut posts: Vec<PostWithLikes> =
            tables.posts.iter().map(|p| tables.with_likes(p)).collect();
        match sorting {
            PostSorting::New => posts.reverse(),
            PostSorting::Old => {}
            PostSorting::MostLikes => {
                posts.reverse();
                posts.sort_by(|a, b| b.likes.cmp(&a.likes));
            }
        }
        Ok(posts)
    }

    async fn set_image_url(&self, id: PostId, image_url: &str) -> Result<(), PostError> {
        let mut tables = self.tables.lock().unwrap();
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PostError::NotFound(id))?;
        post.image_url = Some(image_url.to_string());
        Ok(())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, PostError> {
        self.tables.lock().unwrap().comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_like(&self, like: Like) -> Result<Like, PostError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .likes
            .iter()
            .any(|l| l.post_id == like.post_id && l.user_id == like.user_id)
        {
            return Err(PostError::AlreadyLiked {
                post_id: like.post_id,
                user_id: like.user_id,
            });
        }
        tables.likes.push(like.clone());
        Ok(like)
    }
}

/// Mailer that keeps every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Image generator returning a fixed outcome
pub struct StubImageGenerator {
    outcome: Result<GeneratedImage, NotificationError>,
}

impl StubImageGenerator {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(GeneratedImage {
                output_url: GENERATED_IMAGE_URL.to_string(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(NotificationError::ApiResponse(
                "DeepAI API request failed with status code of 500".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ImageGenerator for StubImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, NotificationError> {
        self.outcome.clone()
    }
}

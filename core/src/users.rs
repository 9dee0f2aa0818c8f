//! Client for the `users` collection.

use rand::Rng;

use crate::auth::{AuthScheme, Credentials};
use crate::config::ClientConfig;
use crate::marshaller::JsonMarshaller;
use crate::template::{ClientTemplate, Endpoint, EntityFixture};
use crate::transport::UreqTransport;
use crate::types::User;

pub const USERS_PATH: &str = "/api/users";

const RANDOM_NAME_LEN: usize = 8;

/// Users collection of one service, with its configured default principal.
#[derive(Debug, Clone)]
pub struct UserEndpoint {
    uri: String,
    default_principal: Credentials,
    auth_scheme: AuthScheme,
}

impl UserEndpoint {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            uri: format!("{}{USERS_PATH}", config.base_url.trim_end_matches('/')),
            default_principal: config.default_principal.clone(),
            auth_scheme: config.auth_scheme,
        }
    }
}

impl Endpoint for UserEndpoint {
    type Resource = User;

    fn uri(&self) -> &str {
        &self.uri
    }

    fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }

    fn default_principal(&self) -> Credentials {
        self.default_principal.clone()
    }
}

impl EntityFixture<User> for UserEndpoint {
    fn create_new_entity(&self) -> User {
        let name = random_alphabetic(RANDOM_NAME_LEN);
        User {
            id: None,
            email: format!("{name}@example.com"),
            name,
            roles: Vec::new(),
        }
    }

    fn change(&self, resource: &mut User) {
        resource.name = random_alphabetic(RANDOM_NAME_LEN);
    }

    fn invalidate(&self, resource: &mut User) {
        resource.name.clear();
    }
}

pub type UserClient = ClientTemplate<UserEndpoint, UreqTransport, JsonMarshaller>;

impl ClientTemplate<UserEndpoint, UreqTransport, JsonMarshaller> {
    pub fn from_config(config: &ClientConfig) -> Self {
        ClientTemplate::new(
            UserEndpoint::new(config),
            UreqTransport::with_timeout(config.timeout),
            JsonMarshaller,
        )
    }
}

fn random_alphabetic(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}

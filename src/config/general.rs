use crate::config::*;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "listen")]
    listen: String,
}

impl Default for General {
    fn default() -> Self {
        Self { listen: listen() }
    }
}

impl General {
    pub fn check(&self) -> Result<(), ConfigError> {
        self.listen().map(|_| ())
    }

    pub fn listen(&self) -> Result<SocketAddr, ConfigError> {
        resolve(&self.listen)
    }
}

fn listen() -> String {
    "127.0.0.1:4243".into()
}

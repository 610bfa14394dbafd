use std::{collections::HashMap, sync::Arc};

use url::Url;

use crate::{Live, LiveBuilder, LiveError, LiveResult};

/// Maps domain names to the builders of the platforms serving them.
///
/// Platforms are registered explicitly during startup, a domain can only be
/// claimed once.
#[derive(Default, Clone)]
pub struct LiveRegistry {
    builders: HashMap<String, Arc<dyn LiveBuilder>>,
}

impl LiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<D, B>(&mut self, domain: D, builder: B) -> LiveResult<&mut Self>
    where
        D: AsRef<str>,
        B: LiveBuilder + 'static,
    {
        self.register_shared(domain, Arc::new(builder))
    }

    /// Register the same builder instance under another domain.
    pub fn register_shared<D>(
        &mut self,
        domain: D,
        builder: Arc<dyn LiveBuilder>,
    ) -> LiveResult<&mut Self>
    where
        D: AsRef<str>,
    {
        let domain = domain.as_ref().to_ascii_lowercase();
        if self.builders.contains_key(&domain) {
            return Err(LiveError::DuplicateDomain(domain));
        }

        log::debug!("registered live platform for {domain}");
        self.builders.insert(domain, builder);
        Ok(self)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.builders.contains_key(&domain.to_ascii_lowercase())
    }

    /// Registered domains in lexical order.
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<_> = self.builders.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }

    pub fn build(&self, url: &Url) -> LiveResult<Box<dyn Live>> {
        let Some(host) = url.host_str() else {
            return Err(LiveError::MissingHost(url.clone()));
        };

        let builder = self
            .builders
            .get(&host.to_ascii_lowercase())
            .ok_or_else(|| LiveError::UnsupportedHost(host.to_string()))?;

        builder.build(url.clone()).map_err(LiveError::Build)
    }

    pub fn parse(&self, input: &str) -> LiveResult<Box<dyn Live>> {
        let url = Url::parse(input)?;
        self.build(&url)
    }
}

/// Gateway sub-API a command is served from; it is the first URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Http,
    Mms,
}

impl Service {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Mms => "mms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single gateway call: `{base}/{service}/{name}` plus its parameters (auth excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: &'static str,
    service: Service,
    method: Method,
    params: Vec<(String, String)>,
}

impl Command {
    pub fn get(name: &'static str) -> Self {
        Self {
            name,
            service: Service::Http,
            method: Method::Get,
            params: Vec::new(),
        }
    }

    pub fn post(name: &'static str) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(name)
        }
    }

    pub fn on(mut self, service: Service) -> Self {
        self.service = service;
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.params.push((key.to_owned(), value.into()));
    }

    pub fn push_opt(&mut self, key: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn push_flag(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.push(key, "1");
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }

    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.service.as_str(),
            self.name
        )
    }
}

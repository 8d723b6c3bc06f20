// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const ME: &str = "/v1/me";
pub const ITEMS: &str = "/v1/items";
pub const ITEMS_PREFIX: &str = "/v1/items/";
pub const ITEM: &str = "/v1/items/{id}";

/// Paths the router recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Me,
    Items,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Me => ME,
            Route::Items => ITEMS,
        }
    }

    /// Exact, case-sensitive match
    pub fn matches(self, path: &str) -> bool {
        self.path() == path
    }

    /// Literal prefix match; empty paths never match
    pub fn is_prefix_of(self, path: &str) -> bool {
        !path.is_empty() && path.starts_with(self.path())
    }
}

/// Where an items-route path points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsTarget<'a> {
    Collection,
    Item(&'a str),
    Unknown,
}

impl<'a> ItemsTarget<'a> {
    pub fn parse(path: &'a str) -> Self {
        if Route::Items.matches(path) {
            return ItemsTarget::Collection;
        }
        match path.strip_prefix(ITEMS_PREFIX) {
            Some(id) if !id.is_empty() => ItemsTarget::Item(id),
            _ => ItemsTarget::Unknown,
        }
    }
}

/// Method tokens the router understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(format!("Unsupported HTTP method: {other}")),
        }
    }
}

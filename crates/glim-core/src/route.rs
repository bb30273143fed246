//! Hash routes (`#/vista?cellId=...`).

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Profile,
    Vista { cell_id: Option<String> },
    Cell,
    Environment { cell_id: String },
    NotFound(String),
}

impl Route {
    /// Parse `location.hash`. A missing or bare `#` is home.
    pub fn parse(hash: &str) -> Self {
        let raw = hash.trim_start_matches('#');
        let (path, query) = match raw.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (raw, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["profile"] => Route::Profile,
            ["vista"] => Route::Vista {
                cell_id: query.and_then(|q| query_param(q, "cellId")),
            },
            ["cell"] => Route::Cell,
            ["cell", id, "environment"] => Route::Environment {
                cell_id: (*id).to_string(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".into(),
            Route::Login => "#/login".into(),
            Route::Register => "#/register".into(),
            Route::Profile => "#/profile".into(),
            Route::Vista { cell_id: None } => "#/vista".into(),
            Route::Vista { cell_id: Some(id) } => format!("#/vista?cellId={id}"),
            Route::Cell => "#/cell".into(),
            Route::Environment { cell_id } => format!("#/cell/{cell_id}/environment"),
            Route::NotFound(path) => format!("#{path}"),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(
            self,
            Route::Profile | Route::Vista { .. } | Route::Cell | Route::Environment { .. }
        )
    }

    /// Route to actually show. Private routes need a session; unknown paths
    /// go home.
    pub fn resolve(self, authenticated: bool) -> Route {
        match self {
            r if r.is_private() && !authenticated => Route::Login,
            Route::NotFound(path) => {
                log::warn!("[router] unknown route {path:?}");
                Route::Home
            }
            r => r,
        }
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

/// Page mount counter. Async work records the value at start and drops its
/// result when another page has mounted since.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MountGeneration(u64);

impl MountGeneration {
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    #[inline]
    pub fn current(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_current(self, generation: u64) -> bool {
        self.0 == generation
    }
}

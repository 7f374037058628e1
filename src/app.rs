//! Request dispatcher module
//!
//! The single callable boundary of the component. Per request: exact route
//! match first, then static-file resolution for GET, then the documented
//! empty-triple fallthrough. The response head goes out through the supplied
//! callback; the body is returned for the caller to drain.

use crate::cache::FileCache;
use crate::config::Config;
use crate::fs::Manifest;
use crate::handler::RouteTable;
use crate::http::{mime, Body, Header, Request, Response};
use std::path::PathBuf;

struct StaticFiles {
    root: PathBuf,
    manifest: Manifest,
}

/// The request dispatcher
///
/// Owns its route table, manifest, and file cache outright; independent
/// instances do not share state. The manifest is built once in `new` and not
/// refreshed afterwards.
pub struct App {
    routes: RouteTable,
    statics: Option<StaticFiles>,
    cache: FileCache,
    index: String,
}

impl App {
    /// Build the dispatcher, enumerating the static root if one is configured
    #[must_use]
    pub fn new(cfg: &Config) -> Self {
        let statics = cfg.static_files.root.as_ref().map(|root| {
            let root = PathBuf::from(root);
            let manifest = Manifest::build(&root);
            StaticFiles { root, manifest }
        });
        Self {
            routes: RouteTable::new(),
            statics,
            cache: FileCache::new(cfg.cache.max_bytes, cfg.cache.chunk_size),
            index: cfg.static_files.index.clone(),
        }
    }

    /// Register a handler for (`method`, `path`); re-registration overwrites
    pub fn on<F>(&mut self, method: &str, path: &str, handler: F)
    where
        F: FnMut(&Request) -> Response + 'static,
    {
        self.routes.register(method, path, Box::new(handler));
    }

    /// The file cache owned by this dispatcher
    #[must_use]
    pub const fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Handle one request
    ///
    /// `start_response` is invoked exactly once with the status line and
    /// header list before this returns; the returned body is drained by the
    /// caller afterwards. A storage failure during that drain surfaces from
    /// the body iterator, not from here.
    pub fn handle<F>(&mut self, req: &Request, start_response: F) -> Body
    where
        F: FnOnce(&str, &[Header]),
    {
        let resp = self.dispatch(req);
        start_response(&resp.status, &resp.headers);
        resp.body
    }

    fn dispatch(&mut self, req: &Request) -> Response {
        // Registered handlers win over static files.
        if let Some(handler) = self.routes.lookup(&req.method, &req.path) {
            return handler(req);
        }

        if !req.method.eq_ignore_ascii_case("get") {
            return Response::empty();
        }
        let Some(statics) = &self.statics else {
            return Response::empty();
        };

        if statics.manifest.contains(&req.path) {
            return serve_static(statics, &self.cache, &req.path);
        }
        if req.path == "/" && statics.manifest.contains(&self.index) {
            return serve_static(statics, &self.cache, &self.index);
        }

        // No route, no static match: the empty triple, not a 404.
        Response::empty()
    }
}

/// Serve one manifest entry through the cache
///
/// The eviction check runs before the cache lookup, so it can evict the very
/// entry this request is about to replay.
fn serve_static(statics: &StaticFiles, cache: &FileCache, rooted: &str) -> Response {
    let full_path = statics.root.join(rooted.trim_start_matches('/'));
    cache.check_and_evict();
    let body = cache.get_or_populate(&full_path);
    Response::ok(mime::content_type(rooted), body)
}

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::path::{decode_segment, parse_query, render_full_path};
use crate::models::{RouteDescriptor, RouteLocation, RouteMeta};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),
    #[error("route '{name}' has a path that does not start with '/': '{path}'")]
    InvalidPath { name: String, path: String },
    #[error("no route named '{0}'")]
    UnknownName(String),
    #[error("route '{name}' needs a value for param '{param}'")]
    MissingParam { name: String, param: String },
}

#[derive(Debug)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug)]
struct CompiledRoute {
    descriptor: RouteDescriptor,
    segments: Vec<Segment>,
}

impl CompiledRoute {
    fn compile(descriptor: RouteDescriptor) -> Result<Self, RouteError> {
        if !descriptor.path.starts_with('/') {
            return Err(RouteError::InvalidPath {
                name: descriptor.name.clone(),
                path: descriptor.path.clone(),
            });
        }
        let segments = split_segments(&descriptor.path)
            .map(|s| match s.strip_prefix(':') {
                Some(param) => Segment::Param(param.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Ok(CompiledRoute {
            descriptor,
            segments,
        })
    }

    /// Returns captured params and the number of literal segments on a match.
    fn matches(&self, parts: &[String]) -> Option<(BTreeMap<String, String>, usize)> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        let mut literals = 0;
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit.eq_ignore_ascii_case(part) => literals += 1,
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.clone());
                }
            }
        }
        Some((params, literals))
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The immutable set of navigable routes, built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        let mut routes = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !seen.insert(descriptor.name.clone()) {
                return Err(RouteError::DuplicateName(descriptor.name));
            }
            routes.push(CompiledRoute::compile(descriptor)?);
        }
        Ok(RouteTable { routes })
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().map(|r| &r.descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.descriptors().find(|d| d.name == name)
    }

    /// Fails on the first name that has no route. Redirect targets are
    /// checked with this at startup.
    pub fn validate_targets<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RouteError> {
        for name in names {
            if self.get(name).is_none() {
                return Err(RouteError::UnknownName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Resolve a raw `path?query#hash` string. Segments are percent-decoded
    /// before matching, literal segments match case-insensitively and the
    /// most specific route wins.
    pub fn resolve(&self, raw: &str) -> RouteLocation {
        let (without_hash, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, format!("#{}", hash)),
            None => (raw, String::new()),
        };
        let (path, query) = match without_hash.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (without_hash, BTreeMap::new()),
        };
        let path = if path.is_empty() { "/" } else { path };
        let parts: Vec<String> = split_segments(path).map(decode_segment).collect();

        let mut best: Option<(&CompiledRoute, BTreeMap<String, String>, usize)> = None;
        for route in &self.routes {
            if let Some((params, literals)) = route.matches(&parts) {
                if best.as_ref().map_or(true, |(_, _, score)| literals > *score) {
                    best = Some((route, params, literals));
                }
            }
        }

        let full_path = format!("{}{}", render_full_path(path, &query), hash);
        match best {
            Some((route, params, _)) => RouteLocation {
                name: Some(route.descriptor.name.clone()),
                path: path.to_string(),
                full_path,
                params,
                query,
                meta: route.descriptor.meta,
            },
            None => {
                debug!("No route matches '{}'", path);
                RouteLocation {
                    name: None,
                    path: path.to_string(),
                    full_path,
                    params: BTreeMap::new(),
                    query,
                    meta: RouteMeta::default(),
                }
            }
        }
    }

    /// Build the location of a named route, filling `:param` segments from `params`.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
        query: BTreeMap<String, String>,
    ) -> Result<RouteLocation, RouteError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.descriptor.name == name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;

        let mut path = String::new();
        let mut captured = BTreeMap::new();
        for segment in &route.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(param) => {
                    let value = params.get(param).ok_or_else(|| RouteError::MissingParam {
                        name: name.to_string(),
                        param: param.clone(),
                    })?;
                    path.push_str(value);
                    captured.insert(param.clone(), value.clone());
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }

        Ok(RouteLocation {
            name: Some(name.to_string()),
            full_path: render_full_path(&path, &query),
            path,
            params: captured,
            query,
            meta: route.descriptor.meta,
        })
    }
}

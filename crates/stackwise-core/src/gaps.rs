//! Gap filling: secondary choices derived from the primary ones.
//!
//! Every slot is written with [`RecommendedStack::fill`], so an existing
//! value is never replaced and filling twice is the same as filling once.

use crate::requirements::Requirements;
use crate::stack::RecommendedStack;
use crate::types::Category;

const DEFAULT_CSS: &str = "tailwindcss";

const CSS_BY_FRONTEND: &[(&str, &str)] = &[
    ("react", "tailwindcss"),
    ("nextjs", "tailwindcss"),
    ("vue", "tailwindcss"),
    ("svelte", "tailwindcss"),
    ("angular", "angular-material"),
];

const STATE_BY_FRONTEND: &[(&str, &str)] = &[
    ("react", "zustand"),
    ("nextjs", "zustand"),
    ("vue", "pinia"),
];

/// backend → [(database, orm)]
const ORM_TABLE: &[(&str, &[(&str, &str)])] = &[
    (
        "fastapi",
        &[
            ("postgresql", "sqlalchemy"),
            ("sqlite", "sqlalchemy"),
            ("mongodb", "motor"),
        ],
    ),
    (
        "django",
        &[
            ("postgresql", "django-orm"),
            ("mysql", "django-orm"),
            ("sqlite", "django-orm"),
        ],
    ),
    (
        "express",
        &[
            ("postgresql", "prisma"),
            ("mysql", "prisma"),
            ("mongodb", "mongoose"),
        ],
    ),
    (
        "nestjs",
        &[
            ("postgresql", "typeorm"),
            ("mysql", "typeorm"),
            ("mongodb", "mongoose"),
        ],
    ),
];

/// Managed database platforms with a native auth product.
const NATIVE_AUTH: &[(&str, &str)] = &[
    ("supabase", "supabase-auth"),
    ("firebase", "firebase-auth"),
];
const DEFAULT_AUTH: &str = "jwt";

const SOCKET_BACKENDS: &[&str] = &["fastapi", "express", "nestjs"];

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn orm_for(backend: &str, database: &str) -> Option<&'static str> {
    ORM_TABLE
        .iter()
        .find(|(b, _)| *b == backend)
        .and_then(|(_, dbs)| lookup(dbs, database))
}

/// Add css, state management, orm, auth and realtime where applicable.
pub fn fill_gaps(mut stack: RecommendedStack, reqs: &Requirements) -> RecommendedStack {
    if let Some(frontend) = stack.frontend.clone() {
        let css = lookup(CSS_BY_FRONTEND, &frontend).unwrap_or(DEFAULT_CSS);
        stack.fill(Category::Css, css);

        if let Some(state) = lookup(STATE_BY_FRONTEND, &frontend) {
            stack.fill(Category::StateManagement, state);
        }
    }

    if let (Some(backend), Some(database)) = (stack.backend.as_deref(), stack.database.as_deref()) {
        if let Some(orm) = orm_for(backend, database) {
            stack.fill(Category::Orm, orm);
        }
    }

    if reqs.project_type.has_client() {
        let auth = stack
            .database
            .as_deref()
            .and_then(|db| lookup(NATIVE_AUTH, db))
            .unwrap_or(DEFAULT_AUTH);
        stack.fill(Category::Auth, auth);
    }

    if reqs.constraints.realtime {
        let transport = if stack.is_one_of(Category::Backend, SOCKET_BACKENDS) {
            "websockets"
        } else {
            "sse"
        };
        stack.fill(Category::Realtime, transport);
    }

    stack
}

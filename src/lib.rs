//! # SupplyDesk API
//!
//! Supplier administration backend built on Axum.
//!
//! Every handler follows the same flow: business rules record messages on a
//! request-scoped [`Notifier`](supplydesk_core::Notifier) instead of failing
//! outright, and the outcome is shaped into one envelope:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "errors": ["...", "..."] }
//! ```
//!
//! Success is `200`, failure is `400`. Authentication (`401`), missing
//! claims (`403`) and unknown resources (`404`) short-circuit before the
//! envelope is built.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── supplydesk-core/    # Notifier, envelope shaping, AppError, claim names
//! ├── supplydesk-config/  # JWT and CORS settings
//! └── supplydesk-auth/    # Principal, claim guards, token issuing/validation
//! src/
//! ├── db.rs               # in-memory supplier and product tables
//! ├── middleware/         # CurrentUser, claim guards, panic boundary
//! ├── modules/
//! │   ├── auth/           # register, login, identity store
//! │   ├── products/       # product CRUD
//! │   └── suppliers/      # supplier CRUD and addresses
//! └── utils/              # password hashing
//! ```
//!
//! ## Authorization
//!
//! Write endpoints declare a claim guard built with [`require_claim!`]. A
//! guard passes when the caller is authenticated and holds a claim of the
//! resource type whose value contains the permission, e.g. a
//! `Fornecedor: "Adicionar,Atualizar"` claim grants both add and update.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! JWT_EXPIRY_HOURS=2
//! JWT_ISSUER=supplydesk
//! JWT_AUDIENCE=https://localhost
//! APP_SETTINGS_FILE=appsettings.json   # optional, replaces the JWT_* variables
//! ALLOWED_ORIGINS=http://localhost:4200
//! SERVER_ADDR=0.0.0.0:3000
//! LOG_FORMAT=json                      # optional
//! ```

pub mod db;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use supplydesk_auth;
pub use supplydesk_config;
pub use supplydesk_core;

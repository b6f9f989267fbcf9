/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth: bearer access check, http: transport-level layers
 */
pub mod auth;
pub mod http;

pub mod authz;
pub mod whoami;

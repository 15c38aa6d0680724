//! # Tenant Context
//!
//! Per-request resolution of the acting tenant. Each request carries its
//! own immutable [`TenantContext`] value built once at the authentication
//! boundary; nothing here is shared across requests.
//!
//! Resolution precedence, first hit wins:
//!
//! 1. explicit override (trusted internal flows such as provisioning)
//! 2. tenant claim from the verified identity
//! 3. `X-TenantId` request header
//!
//! Resolution never fails: an unresolved context yields `None`, which the
//! persistence gateway treats as privileged unscoped access. Gating that
//! mode is the authorization layer's job.

use uuid::Uuid;

/// Name of the request header carrying a caller-supplied tenant id.
pub const TENANT_HEADER: &str = "x-tenantid";

/// Immutable snapshot of every tenant signal present on one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenantContext {
    override_tenant: Option<Uuid>,
    claim_tenant: Option<Uuid>,
    header_tenant: Option<Uuid>,
}

impl TenantContext {
    pub fn new(claim_tenant: Option<Uuid>, header_tenant: Option<Uuid>) -> Self {
        Self {
            override_tenant: None,
            claim_tenant,
            header_tenant,
        }
    }

    /// Context carrying only an explicit tenant, for internal flows that
    /// act on behalf of a known tenant without a request attached.
    pub fn fixed(tenant: Uuid) -> Self {
        Self::default().with_override(tenant)
    }

    /// Returns a copy with the override slot set. The override beats
    /// claim and header until cleared.
    pub fn with_override(mut self, tenant: Uuid) -> Self {
        self.override_tenant = Some(tenant);
        self
    }

    /// Returns a copy with the override slot cleared, falling back to
    /// claim then header.
    pub fn without_override(mut self) -> Self {
        self.override_tenant = None;
        self
    }

    /// The acting tenant under the precedence order, or `None` when no
    /// signal is present.
    pub fn resolve(&self) -> Option<Uuid> {
        self.override_tenant
            .or(self.claim_tenant)
            .or(self.header_tenant)
    }
}

/// Parses a tenant id out of a header value. Malformed input counts as
/// absent rather than an error.
pub fn parse_tenant_header(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

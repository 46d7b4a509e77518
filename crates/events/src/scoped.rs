use wagemill_core::OrganizationId;

/// Helper trait for organization-scoped messages.
///
/// Marks message types that carry an organization id, so infrastructure
/// components (workers, handlers) can pin themselves to one organization and
/// ignore everyone else's traffic. Filtering at the consumer is defense in
/// depth on top of whatever scoping the publisher does.
pub trait OrganizationScoped {
    fn organization_id(&self) -> OrganizationId;
}

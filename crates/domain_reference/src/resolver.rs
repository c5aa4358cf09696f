//! Overlay resolution
//!
//! Resolution merges the global rows of a category with the requesting
//! tenant's own rows and orders the result for presentation. Validity
//! checks are membership tests over the very same pass, so a list and the
//! predicate over it can never disagree within a call.
//!
//! Locale handling: the requested locale is parsed up front, then
//! negotiated against the locales the snapshot actually carries (`en`
//! finds `en-US`). A locale with no negotiable match is rejected as an
//! unsupported argument, not answered with an empty list.

use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::sync::Arc;
use tracing::debug;

use core_kernel::{LocaleId, PartyKind, TenantId};

use crate::category::ReferenceCategory;
use crate::error::ReferenceError;
use crate::item::{ItemDetail, ReferenceItem};
use crate::store::{ReferenceSnapshot, ReferenceStore};

impl ReferenceSnapshot {
    /// Picks the supported locale serving the requested one
    ///
    /// Exact match wins; otherwise filtering negotiation is used, so a
    /// bare language finds its regional variants.
    pub fn effective_locale(&self, requested: &LocaleId) -> Result<LocaleId, ReferenceError> {
        if self.supported_locales().contains(requested) {
            return Ok(requested.clone());
        }
        let wanted = vec![requested.as_langid().clone()];
        let negotiated = negotiate_languages(
            &wanted,
            self.supported_langids(),
            None,
            NegotiationStrategy::Filtering,
        );
        negotiated
            .first()
            .map(|langid| LocaleId::from((*langid).clone()))
            .ok_or_else(|| ReferenceError::unsupported_locale(requested.to_string()))
    }

    /// The effective, ordered reference list for one category
    ///
    /// Selects global rows plus the requested tenant's rows (the overlay
    /// adds, never removes), ordered by sort index ascending with unindexed
    /// rows after indexed ones and load order as the tie-break.
    pub fn resolve(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &LocaleId,
    ) -> Result<Vec<ReferenceItem>, ReferenceError> {
        let effective = self.effective_locale(locale)?;
        let mut items: Vec<ReferenceItem> = self
            .rows(category, &effective)
            .filter(|item| item.scope.is_visible_to(tenant))
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.sort_index.is_none(), item.sort_index));
        debug!(
            category = %category,
            tenant = tenant.map(TenantId::as_str),
            locale = %effective,
            entries = items.len(),
            "resolved reference list"
        );
        Ok(items)
    }

    /// Whether a code is part of the effective list
    pub fn is_valid(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &LocaleId,
        code: &str,
    ) -> Result<bool, ReferenceError> {
        Ok(self
            .resolve(category, tenant, locale)?
            .iter()
            .any(|item| item.code == code))
    }

    /// Whether a code is part of the effective list and applies to the
    /// given party kind
    pub fn is_valid_for_party_kind(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &LocaleId,
        code: &str,
        kind: PartyKind,
    ) -> Result<bool, ReferenceError> {
        Ok(self
            .resolve(category, tenant, locale)?
            .iter()
            .filter(|item| item.applies_to(kind))
            .any(|item| item.code == code))
    }

    /// Whether a contact mechanism role code is valid for a mechanism type
    ///
    /// The mechanism type is the category-specific secondary key of the
    /// contact-mechanism-role list.
    pub fn is_valid_contact_mechanism_role(
        &self,
        tenant: Option<&TenantId>,
        locale: &LocaleId,
        code: &str,
        mechanism_type: &str,
    ) -> Result<bool, ReferenceError> {
        Ok(self
            .resolve(ReferenceCategory::ContactMechanismRoles, tenant, locale)?
            .iter()
            .filter(|item| match &item.detail {
                ItemDetail::ContactMechanismRole { mechanism_type: mt } => mt == mechanism_type,
                _ => false,
            })
            .any(|item| item.code == code))
    }
}

/// The caller-facing resolution surface
///
/// Every method parses its arguments, takes the current snapshot once, and
/// answers entirely from it. A reload between two calls changes the answer;
/// a reload during a call does not.
#[derive(Debug, Clone)]
pub struct OverlayResolver {
    store: Arc<ReferenceStore>,
}

impl OverlayResolver {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Resolves the effective reference list for a category
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (malformed or unsupported locale); reference
    /// lookups never fail with `NotFound` — an unknown code simply is not
    /// in the list.
    pub fn resolve(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &str,
    ) -> Result<Vec<ReferenceItem>, ReferenceError> {
        let locale = LocaleId::parse(locale)?;
        self.store.snapshot().resolve(category, tenant, &locale)
    }

    /// Resolves the global list in the module default locale
    pub fn resolve_default(
        &self,
        category: ReferenceCategory,
    ) -> Result<Vec<ReferenceItem>, ReferenceError> {
        self.store
            .snapshot()
            .resolve(category, None, &LocaleId::default_locale())
    }

    /// Membership test over the same resolution pass
    pub fn is_valid(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &str,
        code: &str,
    ) -> Result<bool, ReferenceError> {
        let locale = LocaleId::parse(locale)?;
        self.store
            .snapshot()
            .is_valid(category, tenant, &locale, code)
    }

    /// Membership test additionally filtered by party kind
    pub fn is_valid_for_party_kind(
        &self,
        category: ReferenceCategory,
        tenant: Option<&TenantId>,
        locale: &str,
        code: &str,
        kind: PartyKind,
    ) -> Result<bool, ReferenceError> {
        let locale = LocaleId::parse(locale)?;
        self.store
            .snapshot()
            .is_valid_for_party_kind(category, tenant, &locale, code, kind)
    }

    /// Membership test for a role code under one contact mechanism type
    pub fn is_valid_contact_mechanism_role(
        &self,
        tenant: Option<&TenantId>,
        locale: &str,
        code: &str,
        mechanism_type: &str,
    ) -> Result<bool, ReferenceError> {
        let locale = LocaleId::parse(locale)?;
        self.store
            .snapshot()
            .is_valid_contact_mechanism_role(tenant, &locale, code, mechanism_type)
    }
}

//! Who may call the distribution entry point.

use vesta_types::AccountAddress;

/// Access-control collaborator consulted before every distribution.
pub trait Authority {
    fn is_issuer(&self, caller: &AccountAddress) -> bool;
}

/// The issuer account and nobody else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleIssuer(pub AccountAddress);

impl Authority for SingleIssuer {
    fn is_issuer(&self, caller: &AccountAddress) -> bool {
        &self.0 == caller
    }
}

impl<A: Authority + ?Sized> Authority for &A {
    fn is_issuer(&self, caller: &AccountAddress) -> bool {
        (**self).is_issuer(caller)
    }
}

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque identifier of a user in the media collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const KNOWN_USERS: &[(&str, &str)] = &[
    ("prithvi@styldod.com", "0841a3b0-5001-7066-b2d0-6967bce2d9fa"),
    ("arul.p@styldod.com", "085123d0-a021-706c-78b4-1da037a46564"),
    ("arika.srivastava@olx.com", "08d19300-10e1-7033-450d-c9c9678a6fe9"),
    ("rohit.panda@styldod.com", "18215390-b061-70ff-2b0a-0c77¢46ealaa"),
    ("hannan@styldod.com", "281103f0-6031-7021-bdcb-30969efbf44c"),
    ("deepak.pandey@styldod.com", "3811f3f0-f051-7062-1c0e-62d9bb1e2093"),
    ("prithvi+1@styldod.com", "38315380-30f1-70F1-851c-a545b18670eF"),
    ("akhilesh@styldod.com", "38c13370-1071-7030-b9ae-43f920318F7e"),
    ("siddhanta.gupta@styidod.com", "38e1d350-a0d1-70e0-a168-698c58946bf4"),
    ("todd@styldod.com", "4831c3d0-8041-70f2-c63e-2F1fb1fbd782"),
    ("maximillian.diez@gmail.com", "48b163b0-a0c1-70d0-639c-b89afbb0b721"),
    ("rj@styldod.com", "48d11330-3021-70e5-bdb6-3a79034d0f33"),
    ("kiran@styldod.com", "58612370-e021-70c5-d694-930f7f88042e"),
    ("samardip.mandal@styldod.com", "58b12310-a081-7013-060e-d06ebb25b419"),
    ("komal@styldod.com", "68f133d0-7011-707a-3549-7d68d1e1ab13"),
    ("akash.shitole@styldod.com", "883173f0-f091-7000-73d6-fa137d086a8d"),
    ("akash.shitole.5595@gmail.com", "88412350-30a1-70e4-29da-1e06a1e42b25"),
    ("prithvi.pr1011@gmail.com", "8841f340-b081-7024-016c-cd63e147fbOF"),
    ("kyniemvui91@gmail.com", "8861f3c0-80b1-7069-c2ff-B8e855eTceccd"),
    ("manjunath.bc@styldod.com", "88e1f3d0-70c1-70b1-bfc3-6163e9e65¢75"),
    ("abhishek.rath@styldod.com", "9811b3c0-€031-70f7-d10a-e6F4fcde1abb"),
    ("zeeshan.noor@styldod.com", "a871e350-7031-70ec-Scbb-9d3840b6395"),
    ("adam.dabrowski@olx.pl", "a891f5c0-b041-70ef-e8e1-69fb4039668C"),
    ("dray@recore.net", "e8e1d390-7051-70fc-2391-5d6d8c017e57"),
    ("shital@styldod.com", "b8a1c320-30b1-7019-4609-c871a9c78b53"),
    ("tuannm.ifc@gmail.com", "e87163f0-c081-7022-81c0-deec1d713efe"),
    ("rohit.thorat@styldod.com", "f8016340-8021-70b3-d001-64ee38251d37"),
];

lazy_static::lazy_static! {
    static ref BUILTIN_MAPPING: HashMap<String, UserId> = KNOWN_USERS
        .iter()
        .map(|(email, id)| (email.to_string(), UserId::new(*id)))
        .collect();
}

/// Maps an email address to a user id by exact, case-sensitive match.
/// No trimming or case folding is applied to the input.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    mapping: HashMap<String, UserId>,
}

impl IdentityResolver {
    pub fn builtin() -> Self {
        Self {
            mapping: BUILTIN_MAPPING.clone(),
        }
    }

    /// Built-in mapping with `extra` entries added; an extra entry replaces a built-in one
    /// for the same email.
    pub fn with_entries(extra: &BTreeMap<String, String>) -> Self {
        let mut resolver = Self::builtin();
        for (email, user_id) in extra {
            resolver
                .mapping
                .insert(email.clone(), UserId::new(user_id.as_str()));
        }
        resolver
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            mapping: pairs
                .into_iter()
                .map(|(email, id)| (email.to_string(), UserId::new(id)))
                .collect(),
        }
    }

    pub fn resolve(&self, email: &str) -> Option<&UserId> {
        self.mapping.get(email)
    }

    /// All known (email, user id) pairs sorted by email.
    pub fn entries(&self) -> Vec<(&str, &UserId)> {
        let mut entries: Vec<_> = self
            .mapping
            .iter()
            .map(|(email, id)| (email.as_str(), id))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_email() {
        let resolver = IdentityResolver::builtin();
        assert_eq!(
            resolver.resolve("prithvi@styldod.com"),
            Some(&UserId::new("0841a3b0-5001-7066-b2d0-6967bce2d9fa"))
        );
    }

    #[test]
    fn test_every_builtin_entry_resolves_to_its_id() {
        let resolver = IdentityResolver::builtin();
        assert_eq!(resolver.len(), KNOWN_USERS.len());
        for (email, id) in KNOWN_USERS {
            assert_eq!(resolver.resolve(email).map(UserId::as_str), Some(*id));
        }
    }

    #[test]
    fn test_unknown_and_empty_emails_do_not_resolve() {
        let resolver = IdentityResolver::builtin();
        assert_eq!(resolver.resolve("nobody@nowhere.com"), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn test_resolution_is_case_sensitive_and_untrimmed() {
        let resolver = IdentityResolver::builtin();
        assert_eq!(resolver.resolve("Prithvi@styldod.com"), None);
        assert_eq!(resolver.resolve("PRITHVI@STYLDOD.COM"), None);
        assert_eq!(resolver.resolve(" prithvi@styldod.com"), None);
        assert_eq!(resolver.resolve("prithvi@styldod.com\n"), None);
    }

    #[test]
    fn test_extra_entries_extend_and_override() {
        let extra = BTreeMap::from([
            ("new@example.com".to_string(), "user-new".to_string()),
            ("todd@styldod.com".to_string(), "user-todd".to_string()),
        ]);
        let resolver = IdentityResolver::with_entries(&extra);
        assert_eq!(resolver.len(), KNOWN_USERS.len() + 1);
        assert_eq!(resolver.resolve("new@example.com").map(UserId::as_str), Some("user-new"));
        assert_eq!(resolver.resolve("todd@styldod.com").map(UserId::as_str), Some("user-todd"));
    }

    #[test]
    fn test_entries_are_sorted_by_email() {
        let resolver = IdentityResolver::from_pairs([("b@x.com", "2"), ("a@x.com", "1")]);
        let emails: Vec<&str> = resolver.entries().iter().map(|(email, _)| *email).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }
}

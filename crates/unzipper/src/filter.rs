//! Extension allow-list filtering of archive members.

use crate::types::{ArchiveMember, ExclusionSet, MemberCheck};
use std::collections::BTreeSet;

/// Extension of a member path: everything after the FIRST `.` of the whole
/// stored name, so `archive.tar.gz` yields `tar.gz` and `v1.2/notes` yields
/// `2/notes`. Names without a `.` have no extension.
pub fn member_extension(name: &str) -> Option<&str> {
    name.split_once('.').map(|(_, extension)| extension)
}

/// Whether a single member name passes the allow-list.
///
/// An empty allow-list permits everything. Otherwise the extension must match
/// an entry exactly; members without an extension never match.
pub fn is_allowed(name: &str, allowed: &BTreeSet<String>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    member_extension(name).is_some_and(|extension| allowed.contains(extension))
}

/// Checks every member against the allow-list and collects the rejects.
pub fn check_members<'a, I>(members: I, allowed: &BTreeSet<String>) -> MemberCheck
where
    I: IntoIterator<Item = &'a ArchiveMember>,
{
    if allowed.is_empty() {
        return MemberCheck::all_permitted();
    }

    let excluded: ExclusionSet = members
        .into_iter()
        .filter(|member| !is_allowed(&member.path, allowed))
        .map(|member| member.path.clone())
        .collect();

    MemberCheck {
        all_allowed: excluded.is_empty(),
        excluded,
    }
}

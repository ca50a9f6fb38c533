//! Static directory-export corpora used across harnesses.
//!
//! Each corpus is a `&'static str` shaped like an `ldapsearch` dump: comment
//! header, one `#`-introduced block per entry, and a trailing result footer.

/// Instant every test normaliser is pinned to.
pub const FIXED_IMPORT_TIME: &str = "2024-01-15-10-00-00";

/// A small, clean export: two users and a group.
pub const EXPORT_USERS: &str = "\
# extended LDIF
#
# LDAPv3
# base <DC=corp,DC=example> with scope subtree
# filter: (objectclass=*)
# requesting: ALL
#

# Alice, Users, corp.example
dn: CN=Alice,OU=Users,DC=corp,DC=example
objectClass: top
objectClass: person
objectClass: organizationalPerson
objectClass: user
cn: Alice
sAMAccountName: alice
mail: alice@corp.example
mail: a.smith@corp.example
whenCreated: 20230115093000.0Z
pwdLastSet: 130000000000000000
logonCount: 42
accountExpires: 9223372036854775807
objectGUID:: 3q2+796tvu/erb7v3q2+7w==

# Bob, Users, corp.example
dn: CN=Bob,OU=Users,DC=corp,DC=example
objectClass: top
objectClass: person
objectClass: user
cn: Bob
lastLogonTimestamp: 132223104000000000
badPwdCount: 0

# Admins, Groups, corp.example
dn: CN=Admins,OU=Groups,DC=corp,DC=example
objectClass: top
objectClass: group
cn: Admins
member: CN=Alice,OU=Users,DC=corp,DC=example
member: CN=Bob,OU=Users,DC=corp,DC=example

# search result
search: 2
result: 0 Success

# numResponses: 4
# numEntries: 3
";

/// Number of indexable entries in [`EXPORT_USERS`].
pub const EXPORT_USERS_ENTRIES: usize = 3;

/// An export whose second entry has no `dn` (a referral-style block).
pub const EXPORT_WITH_REFERRAL: &str = "\
# Alice, Users, corp.example
dn: CN=Alice,OU=Users,DC=corp,DC=example
cn: Alice

# search reference
ref: ldap://DomainDnsZones.corp.example/DC=DomainDnsZones,DC=corp,DC=example

# Bob, Users, corp.example
dn: CN=Bob,OU=Users,DC=corp,DC=example
cn: Bob
";

/// An export with a malformed line in the middle entry.
pub const EXPORT_WITH_MALFORMED: &str = "\
# Alice
dn: CN=Alice,OU=Users,DC=corp,DC=example
cn: Alice

# Broken
dn: CN=Broken,OU=Users,DC=corp,DC=example
this line has no separator at all

# Bob
dn: CN=Bob,OU=Users,DC=corp,DC=example
cn: Bob
";

/// An export with non-numeric text in a known-integer attribute.
pub const EXPORT_WITH_BAD_INTEGER: &str = "\
# Carol
dn: CN=Carol,OU=Users,DC=corp,DC=example
logonCount: many
";

/// Build an export of `n` minimal user entries, each with a `dn`.
pub fn export_of(n: usize) -> String {
    let mut out = String::from("# generated export\n\n");
    for i in 0..n {
        out.push_str(&format!(
            "# user{i}\ndn: CN=user{i},OU=Users,DC=corp,DC=example\nobjectClass: top\nobjectClass: user\ncn: user{i}\nlogonCount: {i}\n\n"
        ));
    }
    out.push_str("# numEntries: done\n");
    out
}

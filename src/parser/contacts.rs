use serde::{Deserialize, Serialize};

use super::lines::{self, Line, LineTag};

const NAME_ROLE_LOOKAHEAD: usize = 5;
const DEPARTMENT_LOOKAHEAD: usize = 5;
const NAME_THEN_ROLE_LOOKAHEAD: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A contact together with the grouping that built it and the indices of
/// the lines it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub contact: Contact,
    pub pattern: &'static str,
    pub lines: Vec<usize>,
}

/// What a grouping made of the line it was offered.
enum Outcome {
    NoMatch,
    /// The line was recognized but yielded no contact; only it is consumed.
    Discard,
    Emit(Contact),
}

/// Lines already consumed by earlier contacts, plus the lines the grouping
/// under trial has claimed. Claims are only committed if the grouping emits.
struct Claim<'a> {
    lines: &'a [Line],
    consumed: &'a [bool],
    taken: Vec<usize>,
}

impl<'a> Claim<'a> {
    fn new(lines: &'a [Line], consumed: &'a [bool]) -> Self {
        Claim {
            lines,
            consumed,
            taken: Vec::new(),
        }
    }

    fn free(&self, idx: usize) -> bool {
        idx < self.lines.len() && !self.consumed[idx] && !self.taken.contains(&idx)
    }

    fn take(&mut self, idx: usize) -> &'a Line {
        self.taken.push(idx);
        &self.lines[idx]
    }

    fn window(&self, from: usize, len: usize) -> std::ops::Range<usize> {
        from..(from + len).min(self.lines.len())
    }
}

type Grouping = fn(&mut Claim<'_>, usize) -> Outcome;

/// Groupings in priority order; the first that matches at an index wins.
const GROUPINGS: &[(&'static str, Grouping)] = &[
    ("name_with_role", name_with_role),
    ("department_block", department_block),
    ("name_then_role", name_then_role),
    ("name_then_email", name_then_email),
];

/// Walk classified lines once and group them into contacts.
///
/// Returns the contacts in order of their first line, and the consumed mask.
/// No line index appears in more than one contact.
pub fn assemble(lines: &[Line]) -> (Vec<Assembled>, Vec<bool>) {
    let mut consumed = vec![false; lines.len()];
    let mut out = Vec::new();

    for i in 0..lines.len() {
        if consumed[i] {
            continue;
        }
        for &(pattern, group) in GROUPINGS {
            let mut claim = Claim::new(lines, &consumed);
            let outcome = group(&mut claim, i);
            let mut taken = claim.taken;
            match outcome {
                Outcome::NoMatch => continue,
                Outcome::Discard => {
                    consumed[i] = true;
                }
                Outcome::Emit(contact) => {
                    taken.sort_unstable();
                    for &idx in &taken {
                        consumed[idx] = true;
                    }
                    out.push(Assembled {
                        contact,
                        pattern,
                        lines: taken,
                    });
                }
            }
            break;
        }
    }

    (out, consumed)
}

/// Convenience over [`assemble`] for callers that only want the contacts.
pub fn extract_contacts(block: &str) -> Vec<Contact> {
    let lines = lines::split_block(block);
    assemble(&lines).0.into_iter().map(|a| a.contact).collect()
}

/// "Name, Role[, email][, phone]" followed by optional email/phone lines.
fn name_with_role(claim: &mut Claim<'_>, i: usize) -> Outcome {
    let rows = claim.lines;
    let line = &rows[i];
    if line.tag != LineTag::NameWithRole {
        return Outcome::NoMatch;
    }
    let Some((name, raw_role)) = lines::name_and_role(&line.text) else {
        return Outcome::NoMatch;
    };
    claim.take(i);

    let mut email = lines::email_in(&raw_role).map(str::to_string);
    let mut phone = lines::phone_in(&raw_role).map(str::to_string);
    let mut role = raw_role.clone();
    for lifted in email.iter().chain(phone.iter()) {
        role = role.replacen(lifted.as_str(), "", 1);
    }
    let role = tidy_role(&role);

    for j in claim.window(i + 1, NAME_ROLE_LOOKAHEAD) {
        if !claim.free(j) {
            continue;
        }
        let next = &rows[j];
        match next.tag {
            LineTag::Email if email.is_none() => {
                email = Some(lines::email_value(&claim.take(j).text));
            }
            LineTag::Phone if phone.is_none() => {
                phone = Some(lines::phone_value(&claim.take(j).text));
            }
            _ if next.opens_entry() => break,
            _ => {}
        }
    }

    Outcome::Emit(Contact {
        name,
        role,
        email,
        phone,
    })
}

/// A role-group header ("Mediakontakt", "Investor Relations", ...) followed
/// by name, title and contact details.
fn department_block(claim: &mut Claim<'_>, i: usize) -> Outcome {
    let rows = claim.lines;
    let header = &rows[i];
    if header.tag != LineTag::DepartmentHeader {
        return Outcome::NoMatch;
    }
    claim.take(i);

    let mut name: Option<String> = None;
    let mut role: Option<String> = None;
    let mut email: Option<String> = None;
    let mut phone: Option<String> = None;

    for j in claim.window(i + 1, DEPARTMENT_LOOKAHEAD) {
        if !claim.free(j) {
            continue;
        }
        let next = &rows[j];
        if next.tag == LineTag::DepartmentHeader {
            break;
        }
        match next.tag {
            LineTag::Email if email.is_none() => {
                email = Some(lines::email_value(&claim.take(j).text));
            }
            LineTag::Phone if phone.is_none() => {
                phone = Some(lines::phone_value(&claim.take(j).text));
            }
            _ if name.is_none() && next.opens_entry() => {
                name = Some(claim.take(j).text.clone());
            }
            _ if name.is_some()
                && role.is_none()
                && !next.is_detail()
                && lines::is_title_word(&next.text) =>
            {
                role = Some(claim.take(j).text.clone());
            }
            _ => {}
        }
    }

    if name.is_none() && email.is_none() {
        return Outcome::Discard;
    }

    let role = match (&name, role) {
        (_, Some(role)) => Some(role),
        (Some(_), None) => Some(header.text.clone()),
        (None, None) => None,
    };
    Outcome::Emit(Contact {
        name: name.unwrap_or_else(|| header.text.clone()),
        role,
        email,
        phone,
    })
}

/// A bare name line whose next line reads like a job title.
fn name_then_role(claim: &mut Claim<'_>, i: usize) -> Outcome {
    let rows = claim.lines;
    let line = &rows[i];
    if line.is_detail() || !lines::is_bare_name(&line.text) || !claim.free(i + 1) {
        return Outcome::NoMatch;
    }
    let next = &rows[i + 1];
    if next.is_detail() || !lines::looks_like_role(&next.text) {
        return Outcome::NoMatch;
    }

    let name = claim.take(i).text.clone();
    let role = claim.take(i + 1).text.clone();
    let mut email = None;
    let mut phone = None;

    for j in claim.window(i + 2, NAME_THEN_ROLE_LOOKAHEAD) {
        if !claim.free(j) {
            continue;
        }
        let next = &rows[j];
        match next.tag {
            LineTag::Email if email.is_none() => {
                email = Some(lines::email_value(&claim.take(j).text));
            }
            LineTag::Phone if phone.is_none() => {
                phone = Some(lines::phone_value(&claim.take(j).text));
            }
            _ if next.opens_entry() => break,
            _ => {}
        }
    }

    Outcome::Emit(Contact {
        name,
        role: Some(role),
        email,
        phone,
    })
}

/// A name or department line directly followed by an email address.
fn name_then_email(claim: &mut Claim<'_>, i: usize) -> Outcome {
    let rows = claim.lines;
    if !rows[i].opens_entry() || !claim.free(i + 1) || rows[i + 1].tag != LineTag::Email {
        return Outcome::NoMatch;
    }

    let name = claim.take(i).text.clone();
    let email = lines::email_value(&claim.take(i + 1).text);
    let phone = if claim.free(i + 2) && rows[i + 2].tag == LineTag::Phone {
        Some(lines::phone_value(&claim.take(i + 2).text))
    } else {
        None
    };

    Outcome::Emit(Contact {
        name,
        role: None,
        email: Some(email),
        phone,
    })
}

/// Drop the empty pieces left behind after lifting an email or phone out of
/// a comma-separated role.
fn tidy_role(role: &str) -> Option<String> {
    let parts: Vec<&str> = role
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

//! Plain-text rendering shared by the tool handlers.

use chrono::{DateTime, Utc};

use webex_teams::{Membership, Message, Person, Room};

pub const NONE: &str = "-";

pub fn timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| NONE.to_string())
}

fn or_none(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NONE)
}

/// A heading followed by `label: value` rows.
#[derive(Debug, Default)]
pub struct DetailBlock {
    heading: String,
    rows: Vec<(&'static str, String)>,
}

impl DetailBlock {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.rows.push((label, value.into()));
        self
    }

    /// Add a row only when the value is present.
    pub fn opt_row(self, label: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.row(label, v),
            _ => self,
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.heading.clone();
        for (label, value) in &self.rows {
            out.push_str(&format!("\n  {label}: {value}"));
        }
        out
    }
}

/// A heading followed by one `- ` bullet per item. Continuation lines of an
/// item are indented so every bullet starts a line.
pub fn bullet_list(heading: impl Into<String>, items: impl IntoIterator<Item = String>) -> String {
    let mut out = heading.into();
    for item in items {
        let mut lines = item.lines();
        out.push_str("\n- ");
        out.push_str(lines.next().unwrap_or(""));
        for line in lines {
            out.push_str("\n  ");
            out.push_str(line);
        }
    }
    out
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

pub fn room_line(room: &Room) -> String {
    format!(
        "{} ({}) | id: {} | created: {} | last activity: {}",
        room.title,
        or_none(Some(room.room_type.as_str())),
        room.id,
        timestamp(room.created.as_ref()),
        timestamp(room.last_activity.as_ref())
    )
}

pub fn room_details(heading: &str, room: &Room) -> String {
    DetailBlock::new(heading)
        .row("id", &room.id)
        .row("title", &room.title)
        .row("type", or_none(Some(room.room_type.as_str())))
        .row("locked", room.is_locked.to_string())
        .opt_row("team id", room.team_id.as_deref())
        .opt_row("creator id", room.creator_id.as_deref())
        .row("created", timestamp(room.created.as_ref()))
        .row("last activity", timestamp(room.last_activity.as_ref()))
        .render()
}

pub fn message_line(message: &Message) -> String {
    let body = message
        .text
        .as_deref()
        .or(message.markdown.as_deref())
        .unwrap_or("(no text)");
    format!(
        "[{}] {}: {} (id: {})",
        timestamp(message.created.as_ref()),
        or_none(message.person_email.as_deref()),
        body,
        message.id
    )
}

pub fn member_line(membership: &Membership) -> String {
    let mut line = format!(
        "{} <{}>",
        or_none(membership.person_display_name.as_deref()),
        or_none(membership.person_email.as_deref())
    );
    if membership.is_moderator {
        line.push_str(" [moderator]");
    }
    line.push_str(&format!(
        " | person id: {} | joined: {}",
        or_none(membership.person_id.as_deref()),
        timestamp(membership.created.as_ref())
    ));
    line
}

pub fn person_details(heading: &str, person: &Person) -> String {
    let emails = if person.emails.is_empty() {
        NONE.to_string()
    } else {
        person.emails.join(", ")
    };

    DetailBlock::new(heading)
        .row("id", &person.id)
        .row("display name", or_none(person.display_name.as_deref()))
        .row("emails", emails)
        .opt_row("nickname", person.nick_name.as_deref())
        .opt_row("first name", person.first_name.as_deref())
        .opt_row("last name", person.last_name.as_deref())
        .opt_row("type", person.person_type.as_deref())
        .opt_row("status", person.status.as_deref())
        .opt_row("org id", person.org_id.as_deref())
        .row("created", timestamp(person.created.as_ref()))
        .render()
}

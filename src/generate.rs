use std::{fs, io, path::Path};

use chrono::{Local, NaiveTime};
use rand::{Rng, seq::IndexedRandom};

use crate::{
    api::{CreatedUser, NewTask, NewUser},
    error::FillError,
};

pub const FIRST_NAMES: [&str; 10] = [
    "james", "john", "robert", "michael", "william", "david", "richard", "charles", "joseph",
    "thomas",
];
pub const LAST_NAMES: [&str; 10] = [
    "smith", "johnson", "williams", "jones", "brown", "davis", "miller", "wilson", "moore",
    "taylor",
];

pub const TASK_DESCRIPTION: &str = "Auto-generated task for API testing.";
/// `assignedUserName` the service stores on tasks nobody owns.
pub const UNASSIGNED: &str = "unassigned";

const ASSIGN_PROBABILITY: f64 = 0.6;
const COMPLETED_PROBABILITY: f64 = 0.5;

pub const DAY_SECS: i64 = 86_400;
const MIN_DEADLINE_OFFSET_SECS: i64 = DAY_SECS;
const MAX_DEADLINE_OFFSET_SECS: i64 = 10 * DAY_SECS;

pub fn random_user(rng: &mut impl Rng) -> NewUser {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let suffix: u16 = rng.random_range(1000..=9999);
    NewUser {
        name: format!("{first} {last}"),
        email: format!("{first}{last}{suffix}@example.com"),
    }
}

/// Builds a task named after one of `names`, owned by one of `users` part of the time.
///
/// Returns `None` only when `names` is empty.
pub fn random_task(
    rng: &mut impl Rng,
    names: &[String],
    users: &[CreatedUser],
    day_start_millis: i64,
) -> Option<NewTask> {
    let assignee = if rng.random_bool(ASSIGN_PROBABILITY) {
        users.choose(rng)
    } else {
        None
    };
    let completed = rng.random_bool(COMPLETED_PROBABILITY);
    let name = names.choose(rng)?.clone();
    let (assigned_user, assigned_user_name) = match assignee {
        Some(user) => (user.id.clone(), user.name.clone()),
        None => (String::new(), UNASSIGNED.to_owned()),
    };
    Some(NewTask {
        name,
        deadline: random_deadline(rng, day_start_millis),
        description: TASK_DESCRIPTION,
        completed,
        assigned_user,
        assigned_user_name,
    })
}

/// Whole seconds strictly between one and ten days after `day_start_millis`.
pub fn random_deadline(rng: &mut impl Rng, day_start_millis: i64) -> i64 {
    let offset = rng.random_range(MIN_DEADLINE_OFFSET_SECS + 1..MAX_DEADLINE_OFFSET_SECS);
    day_start_millis + offset * 1000
}

/// Epoch milliseconds of local midnight today.
pub fn day_start_millis() -> i64 {
    let now = Local::now();
    now.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or(now)
        .timestamp_millis()
}

/// Reads newline-separated task names, skipping blank lines.
///
/// An empty list is an error only when `required` tasks are to be created.
pub fn load_task_names(path: &Path, required: usize) -> Result<Vec<String>, FillError> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => FillError::TaskFileMissing {
            path: path.to_owned(),
        },
        _ => FillError::TaskFileRead {
            path: path.to_owned(),
            source,
        },
    })?;
    let names: Vec<String> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect();
    if names.is_empty() && required > 0 {
        return Err(FillError::NoTaskNames {
            path: path.to_owned(),
        });
    }
    Ok(names)
}

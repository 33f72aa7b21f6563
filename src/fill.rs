use std::fmt;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    api::{ApiClient, CreatedUser},
    cli::Cli,
    error::FillError,
    generate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub target: String,
    pub users_requested: usize,
    pub users_created: usize,
    pub tasks_requested: usize,
    pub tasks_created: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully added {} users and {} tasks to {} ({} of {} tasks accepted)",
            self.users_created,
            self.tasks_requested,
            self.target,
            self.tasks_created,
            self.tasks_requested,
        )
    }
}

/// Drives the population steps against one service, remembering the users it created.
#[derive(Debug)]
pub struct Filler<R> {
    client: ApiClient,
    rng: R,
    users: Vec<CreatedUser>,
}

impl<R: Rng> Filler<R> {
    pub fn new(client: ApiClient, rng: R) -> Self {
        Self {
            client,
            rng,
            users: Vec::new(),
        }
    }

    /// Users acknowledged by the service, in creation order.
    pub fn users(&self) -> &[CreatedUser] {
        &self.users
    }

    /// Issues `count` user creation requests; returns how many succeeded.
    pub async fn populate_users(&mut self, count: usize) -> usize {
        let before = self.users.len();
        for _ in 0..count {
            let user = generate::random_user(&mut self.rng);
            match self.client.create_user(&user).await {
                Ok(created) => {
                    debug!("Created user {} ({})", created.name, created.id);
                    self.users.push(created);
                }
                Err(err) => warn!("Failed to create user '{}': {err}", user.name),
            }
        }
        self.users.len() - before
    }

    /// Issues `count` task creation requests; returns how many succeeded.
    pub async fn populate_tasks(
        &mut self,
        count: usize,
        names: &[String],
        day_start_millis: i64,
    ) -> usize {
        let mut created = 0;
        for _ in 0..count {
            let Some(task) =
                generate::random_task(&mut self.rng, names, &self.users, day_start_millis)
            else {
                break;
            };
            match self.client.create_task(&task).await {
                Ok(_) => created += 1,
                Err(err) => warn!("Failed to create task '{}': {err}", task.name),
            }
        }
        created
    }
}

/// Runs both population steps as configured by `cli`.
///
/// The task-name file is read before any request is made, so a missing file
/// leaves the service untouched.
pub async fn run(cli: &Cli) -> Result<Summary, FillError> {
    let names = generate::load_task_names(&cli.tasks_file, cli.tasks)?;
    let client = ApiClient::new(&cli.url, cli.port)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!(
        "Loaded {} task names from {}",
        names.len(),
        cli.tasks_file.display()
    );

    let target = cli.target();
    println!(
        "Adding {} users and {} tasks to {target}",
        cli.users, cli.tasks
    );
    let mut filler = Filler::new(client, rng);
    let users_created = filler.populate_users(cli.users).await;
    info!("{users_created} of {} users created", cli.users);
    let tasks_created = filler
        .populate_tasks(cli.tasks, &names, generate::day_start_millis())
        .await;

    Ok(Summary {
        target,
        users_requested: cli.users,
        users_created,
        tasks_requested: cli.tasks,
        tasks_created,
    })
}

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_appender::rolling;

use hrm_client::api::{DepartmentApi, EmployeeApi};
use hrm_client::model::{Department, Employee, EmployeeStatus};
use hrm_client::models::EmployeeQuery;
use hrm_client::pages::{
    AutoConfirm, Confirm, DashboardPage, DeleteOutcome, DepartmentDraft, DepartmentsPage,
    EmployeeDraft, EmployeesPage, FormErrors, Notifier, SaveOutcome,
};
use hrm_client::ui::{ConsoleNotifier, Paginator, StdinConfirm, views};
use hrm_client::{ApiClient, Config};

#[derive(Parser)]
#[command(name = "hrm-client")]
#[command(about = "Manage employees and departments on the HRM backend")]
struct Cli {
    /// Backend base URL, overrides API_URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Headline numbers, department breakdown and recent hires
    Dashboard,
    /// Check that the backend answers
    Health,
    #[command(subcommand)]
    Employees(EmployeeCommand),
    #[command(subcommand)]
    Departments(DepartmentCommand),
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive search over the visible columns
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page: 5, 10 or 25
    #[arg(long, default_value_t = 10)]
    rows: usize,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Server-side department filter
        #[arg(long)]
        department: Option<u64>,
        /// Server-side status filter
        #[arg(long)]
        status: Option<EmployeeStatus>,
    },
    Show {
        id: u64,
    },
    Create(EmployeeFields),
    Edit {
        id: u64,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete several employees in one request
    DeleteMany {
        #[arg(required = true)]
        ids: Vec<u64>,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct EmployeeFields {
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, value_name = "ID", conflicts_with = "no_department")]
    department: Option<u64>,
    /// Remove the department assignment
    #[arg(long)]
    no_department: bool,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    salary: Option<f64>,
    /// YYYY-MM-DD
    #[arg(long)]
    hire_date: Option<NaiveDate>,
    #[arg(long)]
    status: Option<EmployeeStatus>,
}

impl EmployeeFields {
    fn apply(self, draft: &mut EmployeeDraft) {
        if let Some(v) = self.code {
            draft.employee_code = v;
        }
        if let Some(v) = self.first_name {
            draft.first_name = v;
        }
        if let Some(v) = self.last_name {
            draft.last_name = v;
        }
        if let Some(v) = self.email {
            draft.email = v;
        }
        if let Some(v) = self.phone {
            draft.phone = v;
        }
        if self.no_department {
            draft.department_id = None;
        } else if let Some(v) = self.department {
            draft.department_id = Some(v);
        }
        if let Some(v) = self.position {
            draft.position = v;
        }
        if let Some(v) = self.salary {
            draft.salary = Some(v);
        }
        if let Some(v) = self.hire_date {
            draft.hire_date = Some(v);
        }
        if let Some(v) = self.status {
            draft.status = v;
        }
    }
}

#[derive(Subcommand)]
enum DepartmentCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

fn confirm_gate(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    }
}

fn check_saved(outcome: SaveOutcome, errors: &FormErrors) -> Result<()> {
    match outcome {
        SaveOutcome::Saved => Ok(()),
        SaveOutcome::Invalid => {
            eprint!("{}", views::form_errors(errors));
            bail!("validation failed")
        }
        SaveOutcome::Failed => bail!("save failed"),
        SaveOutcome::Busy => bail!("a save is already in progress"),
    }
}

fn check_deleted(outcome: DeleteOutcome) -> Result<()> {
    match outcome {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::Cancelled => {
            eprintln!("Cancelled");
            Ok(())
        }
        DeleteOutcome::Blocked => bail!("delete is disabled for this selection"),
        DeleteOutcome::Failed => bail!("delete failed"),
    }
}

/// A loaded record, or a direct fetch when it is not in the current list.
async fn find_employee(
    page: &EmployeesPage<ApiClient>,
    client: &ApiClient,
    id: u64,
) -> Result<Employee> {
    if let Some(e) = page.list().find(id) {
        return Ok(e.clone());
    }
    client
        .get_employee(id)
        .await
        .and_then(|env| env.into_data())
        .with_context(|| format!("employee {id} not found"))
}

async fn find_department(
    page: &DepartmentsPage<ApiClient>,
    client: &ApiClient,
    id: u64,
) -> Result<Department> {
    if let Some(d) = page.list().find(id) {
        return Ok(d.clone());
    }
    client
        .get_department(id)
        .await
        .and_then(|env| env.into_data())
        .with_context(|| format!("department {id} not found"))
}

async fn run_employees(
    cmd: EmployeeCommand,
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    let mut page = EmployeesPage::new(client.clone(), notifier);

    match cmd {
        EmployeeCommand::List {
            list,
            department,
            status,
        } => {
            page.set_query(EmployeeQuery {
                search: None,
                department_id: department,
                status,
            });
            if !page.load().await {
                bail!("could not load employees");
            }
            if let Some(filter) = list.filter {
                page.set_filter(filter);
            }
            let pager = Paginator::new(list.rows, list.page);
            let visible = page.visible();
            let selection = page.selection();
            print!(
                "{}",
                views::paged(&visible, pager, "employees", |rows| {
                    views::employees_table(rows, &selection)
                })
            );
        }
        EmployeeCommand::Show { id } => {
            let employee = client
                .get_employee(id)
                .await
                .and_then(|env| env.into_data())
                .with_context(|| format!("employee {id} not found"))?;
            print!("{}", views::employee_detail(&employee));
        }
        EmployeeCommand::Create(fields) => {
            page.load_departments().await;
            page.open_create();
            fields.apply(page.draft_mut());
            if let Some(id) = page.form().draft().department_id
                && !page.departments().iter().any(|d| d.id == id)
            {
                bail!("department {id} does not exist");
            }
            let outcome = page.save().await;
            check_saved(outcome, page.form().errors())?;
        }
        EmployeeCommand::Edit { id, fields } => {
            page.load().await;
            let employee = find_employee(&page, &client, id).await?;
            page.open_edit(&employee);
            fields.apply(page.draft_mut());
            let outcome = page.save().await;
            check_saved(outcome, page.form().errors())?;
        }
        EmployeeCommand::Delete { id, yes } => {
            page.load().await;
            let employee = find_employee(&page, &client, id).await?;
            let outcome = page.delete(&employee, confirm_gate(yes).as_ref()).await;
            check_deleted(outcome)?;
        }
        EmployeeCommand::DeleteMany { ids, yes } => {
            if !page.load().await {
                bail!("could not load employees");
            }
            for id in &ids {
                if !page.select(*id) && !page.selection().contains(id) {
                    bail!("employee {id} not found");
                }
            }
            let outcome = page.delete_selected(confirm_gate(yes).as_ref()).await;
            check_deleted(outcome)?;
        }
    }
    Ok(())
}

async fn run_departments(
    cmd: DepartmentCommand,
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    let mut page = DepartmentsPage::new(client.clone(), notifier);

    match cmd {
        DepartmentCommand::List { list } => {
            if !page.load().await {
                bail!("could not load departments");
            }
            if let Some(filter) = list.filter {
                page.set_filter(filter);
            }
            let pager = Paginator::new(list.rows, list.page);
            let visible = page.visible();
            print!(
                "{}",
                views::paged(&visible, pager, "departments", views::departments_table)
            );
        }
        DepartmentCommand::Create { name, description } => {
            page.open_create();
            apply_department(page.draft_mut(), name, description);
            let outcome = page.save().await;
            check_saved(outcome, page.form().errors())?;
        }
        DepartmentCommand::Edit {
            id,
            name,
            description,
        } => {
            page.load().await;
            let department = find_department(&page, &client, id).await?;
            page.open_edit(&department);
            apply_department(page.draft_mut(), name, description);
            let outcome = page.save().await;
            check_saved(outcome, page.form().errors())?;
        }
        DepartmentCommand::Delete { id, yes } => {
            page.load().await;
            let department = find_department(&page, &client, id).await?;
            if !page.can_delete(&department) {
                bail!(
                    "{} still has {}",
                    department.name,
                    hrm_client::utils::format::employee_count(department.employee_count())
                        .to_lowercase()
                );
            }
            let outcome = page.delete(&department, confirm_gate(yes).as_ref()).await;
            check_deleted(outcome)?;
        }
    }
    Ok(())
}

fn apply_department(draft: &mut DepartmentDraft, name: Option<String>, description: Option<String>) {
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(description) = description {
        draft.description = description;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        let log_dir = config.log_dir.clone();
        config = Config {
            log_dir,
            ..Config::new(url)?
        };
    }

    // Rolling daily log; the terminal is for the pages themselves
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(api_url = %config.api_url, "Client starting");

    let client = ApiClient::new(&config).context("failed to build HTTP client")?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Dashboard => {
            let mut page = DashboardPage::new(client, notifier);
            if !page.load().await {
                bail!("could not load dashboard statistics");
            }
            let chart = page.chart_data();
            print!(
                "{}",
                views::dashboard(&page.cards(), chart.as_ref(), page.recent_employees())
            );
        }
        Command::Health => {
            let up = client
                .health()
                .await
                .with_context(|| format!("backend unreachable at {}", config.health_url()))?;
            if !up {
                bail!("backend at {} answered with an error", config.health_url());
            }
            println!("Backend is up");
        }
        Command::Employees(cmd) => run_employees(cmd, client, notifier).await?,
        Command::Departments(cmd) => run_departments(cmd, client, notifier).await?,
    }

    Ok(())
}

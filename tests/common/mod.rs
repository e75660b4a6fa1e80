#![allow(dead_code)]

pub mod mock_backend;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use hrm_client::api::{DepartmentApi, EmployeeApi, RawResponse, StatsApi};
use hrm_client::error::{ClientError, ClientResult};
use hrm_client::model::{DashboardStats, Department, DepartmentCount, Employee, EmployeeStatus};
use hrm_client::models::{ApiResponse, DepartmentPayload, EmployeePayload, EmployeeQuery};
use hrm_client::pages::{Confirm, ConfirmPrompt, Notification, Notifier, Severity};

/// Every call the controllers made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListEmployees(EmployeeQuery),
    GetEmployee(u64),
    CreateEmployee(EmployeePayload),
    UpdateEmployee(u64, EmployeePayload),
    DeleteEmployee(u64),
    DeleteEmployees(Vec<u64>),
    ListDepartments,
    GetDepartment(u64),
    CreateDepartment(DepartmentPayload),
    UpdateDepartment(u64, DepartmentPayload),
    DeleteDepartment(u64),
    GetStats,
}

#[derive(Default)]
pub struct FakeState {
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub stats: Option<DashboardStats>,
    pub calls: Vec<Call>,
    /// operation name -> (status, envelope error)
    pub failures: HashMap<&'static str, (u16, Option<String>)>,
    next_id: u64,
}

/// In-memory stand-in for the backend, shared by clones.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        let next_id = employees
            .iter()
            .map(|e| e.id)
            .chain(departments.iter().map(|d| d.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Arc::new(Mutex::new(FakeState {
                employees,
                departments,
                next_id,
                ..Default::default()
            })),
        }
    }

    pub fn with_stats(self, stats: DashboardStats) -> Self {
        self.state.lock().unwrap().stats = Some(stats);
        self
    }

    /// Makes every later call to `op` fail with this status and envelope error.
    pub fn fail(&self, op: &'static str, status: u16, error: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, (status, error.map(str::to_string)));
    }

    pub fn heal(&self, op: &'static str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn employee_ids(&self) -> Vec<u64> {
        self.state.lock().unwrap().employees.iter().map(|e| e.id).collect()
    }

    fn record(&self, op: &'static str, call: Call) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(op) {
            Some((status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn ack() -> ClientResult<RawResponse> {
        Ok(ApiResponse {
            data: None,
            error: None,
            message: Some("ok".into()),
        })
    }
}

fn employee_from_payload(id: u64, p: &EmployeePayload, departments: &[Department]) -> Employee {
    Employee {
        id,
        employee_code: p.employee_code.clone(),
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
        email: p.email.clone(),
        phone: Some(p.phone.clone()).filter(|s| !s.is_empty()),
        department_id: p.department_id,
        department_name: p
            .department_id
            .and_then(|id| departments.iter().find(|d| d.id == id))
            .map(|d| d.name.clone()),
        position: p.position.clone(),
        salary: p.salary,
        hire_date: NaiveDate::parse_from_str(&p.hire_date, "%Y-%m-%d").unwrap(),
        status: p.status,
    }
}

#[async_trait]
impl EmployeeApi for FakeApi {
    async fn list_employees(
        &self,
        query: &EmployeeQuery,
    ) -> ClientResult<ApiResponse<Vec<Employee>>> {
        self.record("list_employees", Call::ListEmployees(query.clone()))?;
        Ok(ApiResponse::ok(self.state.lock().unwrap().employees.clone()))
    }

    async fn get_employee(&self, id: u64) -> ClientResult<ApiResponse<Employee>> {
        self.record("get_employee", Call::GetEmployee(id))?;
        let state = self.state.lock().unwrap();
        match state.employees.iter().find(|e| e.id == id) {
            Some(e) => Ok(ApiResponse::ok(e.clone())),
            None => Err(ClientError::Api {
                status: 404,
                message: Some("Employee not found".into()),
            }),
        }
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> ClientResult<RawResponse> {
        self.record("create_employee", Call::CreateEmployee(payload.clone()))?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let employee = employee_from_payload(id, payload, &state.departments);
        state.employees.push(employee);
        Self::ack()
    }

    async fn update_employee(
        &self,
        id: u64,
        payload: &EmployeePayload,
    ) -> ClientResult<RawResponse> {
        self.record("update_employee", Call::UpdateEmployee(id, payload.clone()))?;
        let mut state = self.state.lock().unwrap();
        let updated = employee_from_payload(id, payload, &state.departments);
        if let Some(slot) = state.employees.iter_mut().find(|e| e.id == id) {
            *slot = updated;
        }
        Self::ack()
    }

    async fn delete_employee(&self, id: u64) -> ClientResult<RawResponse> {
        self.record("delete_employee", Call::DeleteEmployee(id))?;
        self.state.lock().unwrap().employees.retain(|e| e.id != id);
        Self::ack()
    }

    async fn delete_employees(&self, ids: &[u64]) -> ClientResult<RawResponse> {
        self.record("delete_employees", Call::DeleteEmployees(ids.to_vec()))?;
        self.state
            .lock()
            .unwrap()
            .employees
            .retain(|e| !ids.contains(&e.id));
        Self::ack()
    }
}

#[async_trait]
impl DepartmentApi for FakeApi {
    async fn list_departments(&self) -> ClientResult<ApiResponse<Vec<Department>>> {
        self.record("list_departments", Call::ListDepartments)?;
        Ok(ApiResponse::ok(self.state.lock().unwrap().departments.clone()))
    }

    async fn get_department(&self, id: u64) -> ClientResult<ApiResponse<Department>> {
        self.record("get_department", Call::GetDepartment(id))?;
        let state = self.state.lock().unwrap();
        state
            .departments
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .map(ApiResponse::ok)
            .ok_or(ClientError::Api {
                status: 404,
                message: Some("Department not found".into()),
            })
    }

    async fn create_department(&self, payload: &DepartmentPayload) -> ClientResult<RawResponse> {
        self.record("create_department", Call::CreateDepartment(payload.clone()))?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.departments.push(department(id, &payload.name, 0));
        Self::ack()
    }

    async fn update_department(
        &self,
        id: u64,
        payload: &DepartmentPayload,
    ) -> ClientResult<RawResponse> {
        self.record(
            "update_department",
            Call::UpdateDepartment(id, payload.clone()),
        )?;
        let mut state = self.state.lock().unwrap();
        if let Some(d) = state.departments.iter_mut().find(|d| d.id == id) {
            d.name = payload.name.clone();
            d.description = Some(payload.description.clone()).filter(|s| !s.is_empty());
        }
        Self::ack()
    }

    async fn delete_department(&self, id: u64) -> ClientResult<RawResponse> {
        self.record("delete_department", Call::DeleteDepartment(id))?;
        self.state.lock().unwrap().departments.retain(|d| d.id != id);
        Self::ack()
    }
}

#[async_trait]
impl StatsApi for FakeApi {
    async fn get_stats(&self) -> ClientResult<ApiResponse<DashboardStats>> {
        self.record("get_stats", Call::GetStats)?;
        Ok(ApiResponse {
            data: self.state.lock().unwrap().stats.clone(),
            error: None,
            message: None,
        })
    }
}

/// Keeps every notification for inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }

    pub fn details(&self, severity: Severity) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.severity == severity)
            .map(|n| n.detail)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Answers every prompt the same way and remembers what it was asked.
pub struct ScriptedConfirm {
    answer: bool,
    asked: Mutex<Vec<ConfirmPrompt>>,
}

impl ScriptedConfirm {
    pub fn accept() -> Self {
        Self {
            answer: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn reject() -> Self {
        Self {
            answer: false,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.asked.lock().unwrap().push(prompt.clone());
        self.answer
    }
}

pub fn employee(id: u64, first: &str, last: &str, department: Option<(u64, &str)>) -> Employee {
    Employee {
        id,
        employee_code: format!("EMP-{id:03}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@company.ph", first.to_lowercase()),
        phone: None,
        department_id: department.map(|(id, _)| id),
        department_name: department.map(|(_, name)| name.to_string()),
        position: "Analyst".to_string(),
        salary: 35000.0,
        hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        status: EmployeeStatus::Active,
    }
}

pub fn department(id: u64, name: &str, employee_count: u64) -> Department {
    Department {
        id,
        name: name.to_string(),
        description: None,
        employee_count: Some(employee_count),
        created_at: None,
    }
}

/// Three employees across two departments plus an empty third department.
pub fn seeded() -> FakeApi {
    FakeApi::new(
        vec![
            employee(1, "Ana", "Reyes", Some((10, "Engineering"))),
            employee(2, "Ben", "Cruz", Some((10, "Engineering"))),
            employee(42, "Carla", "Lim", Some((11, "Finance"))),
        ],
        vec![
            department(10, "Engineering", 2),
            department(11, "Finance", 1),
            department(12, "Legal", 0),
        ],
    )
}

pub fn sample_stats() -> DashboardStats {
    DashboardStats {
        total_employees: Some(3),
        active_employees: Some(2),
        average_salary: Some(41666.67),
        department_breakdown: vec![
            DepartmentCount {
                department: "Engineering".into(),
                count: 2,
            },
            DepartmentCount {
                department: "Finance".into(),
                count: 1,
            },
        ],
        recent_employees: vec![employee(42, "Carla", "Lim", Some((11, "Finance")))],
    }
}

//! In-process HRM backend for exercising the real HTTP client.

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use chrono::NaiveDate;
use serde_json::{Value, json};

use hrm_client::Config;
use hrm_client::model::{Department, Employee, EmployeeStatus};
use hrm_client::models::{DeleteManyRequest, DepartmentPayload, EmployeePayload, EmployeeQuery};

#[derive(Default)]
pub struct Backend {
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    /// `"METHOD /path"` per request, in arrival order
    pub requests: Vec<String>,
    pub last_query: Option<EmployeeQuery>,
    pub last_body: Option<Value>,
    pub healthy: bool,
    next_id: u64,
}

impl Backend {
    fn log(&mut self, line: impl Into<String>) {
        self.requests.push(line.into());
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn employee_from(&self, id: u64, p: &EmployeePayload) -> Result<Employee, HttpResponse> {
        let hire_date = NaiveDate::parse_from_str(&p.hire_date, "%Y-%m-%d")
            .map_err(|_| HttpResponse::BadRequest().json(json!({ "error": "Invalid hire date" })))?;
        Ok(Employee {
            id,
            employee_code: p.employee_code.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            email: p.email.clone(),
            phone: Some(p.phone.clone()).filter(|s| !s.is_empty()),
            department_id: p.department_id,
            department_name: p
                .department_id
                .and_then(|id| self.departments.iter().find(|d| d.id == id))
                .map(|d| d.name.clone()),
            position: p.position.clone(),
            salary: p.salary,
            hire_date,
            status: p.status,
        })
    }

    fn recount(&mut self) {
        for dept in &mut self.departments {
            let count = self
                .employees
                .iter()
                .filter(|e| e.department_id == Some(dept.id))
                .count() as u64;
            dept.employee_count = Some(count);
        }
    }
}

type Shared = web::Data<Mutex<Backend>>;

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": format!("{what} not found") }))
}

async fn index(state: Shared) -> HttpResponse {
    if state.lock().unwrap().healthy {
        HttpResponse::Ok().body("HRM backend is running")
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}

async fn list_employees(state: Shared, query: web::Query<EmployeeQuery>) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("GET /employees");
    let query = query.into_inner();

    let needle = query.search.as_deref().map(str::to_lowercase);
    let data: Vec<&Employee> = b
        .employees
        .iter()
        .filter(|e| query.department_id.is_none_or(|id| e.department_id == Some(id)))
        .filter(|e| query.status.is_none_or(|s| e.status == s))
        .filter(|e| {
            needle
                .as_deref()
                .is_none_or(|n| e.full_name().to_lowercase().contains(n))
        })
        .collect();
    let body = json!({ "data": data });

    b.last_query = Some(query);
    HttpResponse::Ok().json(body)
}

async fn get_employee(state: Shared, id: web::Path<u64>) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("GET /employees/{id}"));
    match b.employees.iter().find(|e| e.id == id) {
        Some(e) => HttpResponse::Ok().json(json!({ "data": e })),
        None => not_found("Employee"),
    }
}

async fn create_employee(state: Shared, payload: web::Json<EmployeePayload>) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("POST /employees");
    b.last_body = serde_json::to_value(&*payload).ok();

    if b
        .employees
        .iter()
        .any(|e| e.employee_code == payload.employee_code)
    {
        return HttpResponse::Conflict().json(json!({ "error": "Employee ID already exists" }));
    }
    let id = b.next_id();
    match b.employee_from(id, &payload) {
        Ok(employee) => {
            b.employees.push(employee);
            b.recount();
            HttpResponse::Created().json(json!({ "data": { "id": id }, "message": "Employee created" }))
        }
        Err(resp) => resp,
    }
}

async fn update_employee(
    state: Shared,
    id: web::Path<u64>,
    payload: web::Json<EmployeePayload>,
) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("PUT /employees/{id}"));
    b.last_body = serde_json::to_value(&*payload).ok();

    let Some(pos) = b.employees.iter().position(|e| e.id == id) else {
        return not_found("Employee");
    };
    match b.employee_from(id, &payload) {
        Ok(employee) => {
            b.employees[pos] = employee;
            b.recount();
            HttpResponse::Ok().json(json!({ "message": "Employee updated" }))
        }
        Err(resp) => resp,
    }
}

async fn delete_employee(state: Shared, id: web::Path<u64>) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("DELETE /employees/{id}"));

    let before = b.employees.len();
    b.employees.retain(|e| e.id != id);
    if b.employees.len() == before {
        return not_found("Employee");
    }
    b.recount();
    HttpResponse::Ok().json(json!({ "message": "Employee deleted" }))
}

async fn delete_employees(state: Shared, body: web::Json<DeleteManyRequest>) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("DELETE /employees");
    b.last_body = serde_json::to_value(&*body).ok();

    b.employees.retain(|e| !body.ids.contains(&e.id));
    b.recount();
    HttpResponse::NoContent().finish()
}

async fn list_departments(state: Shared) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("GET /departments");
    HttpResponse::Ok().json(json!({ "data": b.departments }))
}

async fn get_department(state: Shared, id: web::Path<u64>) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("GET /departments/{id}"));
    match b.departments.iter().find(|d| d.id == id) {
        Some(d) => HttpResponse::Ok().json(json!({ "data": d })),
        None => not_found("Department"),
    }
}

async fn create_department(state: Shared, payload: web::Json<DepartmentPayload>) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("POST /departments");
    b.last_body = serde_json::to_value(&*payload).ok();

    let id = b.next_id();
    b.departments.push(Department {
        id,
        name: payload.name.clone(),
        description: Some(payload.description.clone()).filter(|s| !s.is_empty()),
        employee_count: Some(0),
        created_at: None,
    });
    HttpResponse::Created().json(json!({ "data": { "id": id } }))
}

async fn update_department(
    state: Shared,
    id: web::Path<u64>,
    payload: web::Json<DepartmentPayload>,
) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("PUT /departments/{id}"));
    b.last_body = serde_json::to_value(&*payload).ok();

    let Some(dept) = b.departments.iter_mut().find(|d| d.id == id) else {
        return not_found("Department");
    };
    dept.name = payload.name.clone();
    dept.description = Some(payload.description.clone()).filter(|s| !s.is_empty());
    HttpResponse::Ok().json(json!({ "message": "Department updated" }))
}

async fn delete_department(state: Shared, id: web::Path<u64>) -> HttpResponse {
    let id = id.into_inner();
    let mut b = state.lock().unwrap();
    b.log(format!("DELETE /departments/{id}"));

    let Some(dept) = b.departments.iter().find(|d| d.id == id) else {
        return not_found("Department");
    };
    if !dept.can_delete() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Cannot delete department with employees" }));
    }
    b.departments.retain(|d| d.id != id);
    HttpResponse::Ok().json(json!({ "message": "Department deleted" }))
}

async fn stats(state: Shared) -> HttpResponse {
    let mut b = state.lock().unwrap();
    b.log("GET /stats");

    let total = b.employees.len();
    let active = b
        .employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Active)
        .count();
    let average = if total == 0 {
        0.0
    } else {
        b.employees.iter().map(|e| e.salary).sum::<f64>() / total as f64
    };
    let breakdown: Vec<Value> = b
        .departments
        .iter()
        .map(|d| json!({ "department": d.name, "count": d.employee_count().to_string() }))
        .collect();
    let recent: Vec<&Employee> = b.employees.iter().rev().take(5).collect();

    // the production backend sends aggregates as numeric strings
    HttpResponse::Ok().json(json!({
        "data": {
            "totalEmployees": total.to_string(),
            "activeEmployees": active,
            "averageSalary": format!("{average:.2}"),
            "departmentBreakdown": breakdown,
            "recentEmployees": recent,
        }
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index)).service(
        web::scope("/api")
            .route("/employees", web::get().to(list_employees))
            .route("/employees", web::post().to(create_employee))
            .route("/employees", web::delete().to(delete_employees))
            .route("/employees/{id}", web::get().to(get_employee))
            .route("/employees/{id}", web::put().to(update_employee))
            .route("/employees/{id}", web::delete().to(delete_employee))
            .route("/departments", web::get().to(list_departments))
            .route("/departments", web::post().to(create_department))
            .route("/departments/{id}", web::get().to(get_department))
            .route("/departments/{id}", web::put().to(update_department))
            .route("/departments/{id}", web::delete().to(delete_department))
            .route("/stats", web::get().to(stats)),
    );
}

/// A running backend bound to an ephemeral local port. Stops when dropped.
pub struct MockBackend {
    pub state: Shared,
    url: String,
    handle: ServerHandle,
}

impl MockBackend {
    /// Must be called from inside an actix system, e.g. `#[actix_web::test]`.
    pub async fn start(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        let next_id = employees
            .iter()
            .map(|e| e.id)
            .chain(departments.iter().map(|d| d.id))
            .max()
            .unwrap_or(0);
        let mut backend = Backend {
            employees,
            departments,
            healthy: true,
            next_id,
            ..Default::default()
        };
        backend.recount();

        let state = web::Data::new(Mutex::new(backend));
        let app_state = state.clone();
        let server = HttpServer::new(move || App::new().app_data(app_state.clone()).configure(routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind mock backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            state,
            url: format!("http://{addr}/api"),
            handle,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.url).expect("mock url is valid")
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.lock().unwrap().last_body.clone()
    }

    pub fn last_query(&self) -> Option<EmployeeQuery> {
        self.state.lock().unwrap().last_query.clone()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.state.lock().unwrap().healthy = healthy;
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        // the stop command is sent eagerly; awaiting only waits for shutdown
        let _ = self.handle.stop(false);
    }
}

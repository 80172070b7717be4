use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::catalog::VehicleCatalogEntry;
use crate::models::service_record::ServiceRecord;
use crate::models::user_vehicle::UserVehicle;
use crate::services::maintenance_evaluator::{DueTask, TaskStatusEntry};
use crate::utils::validation::OdometerInput;

// Lecturas de los vehículos seleccionados; los vehículos del catálogo que
// no aparecen quedan deseleccionados
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOdometersRequest {
    #[serde(default)]
    pub readings: HashMap<String, OdometerInput>,
}

#[derive(Debug, Serialize)]
pub struct UpdateOdometersResponse {
    pub vehicles: Vec<UserVehicle>,
    pub removed: Vec<String>,
    pub due_services: Vec<String>,
    pub due_tasks: Vec<DueTask>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MarkServicedRequest {
    #[validate(length(min = 1, message = "Vehicle is required"))]
    pub vehicle_name: String,

    #[validate(length(min = 1, message = "Task is required"))]
    pub task_name: String,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceStatusResponse {
    pub vehicle_name: String,
    pub odometer_km: Option<i64>,
    pub tasks: Vec<TaskStatusEntry>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub vehicles: Vec<String>,
    pub user_vehicles: Vec<UserVehicle>,
    pub service_records: Vec<ServiceRecord>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub vehicles: Vec<VehicleCatalogEntry>,
}

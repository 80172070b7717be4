//! Evaluador de mantenimiento
//!
//! Decide, para cada tarea del catálogo de un vehículo, si está al día o
//! vencida a partir del odómetro actual y del último servicio registrado, y
//! detecta las tareas que vencen al subir una lectura de odómetro.
//!
//! Las funciones `compute_status` y `detect_newly_due` son puras: no leen ni
//! escriben estado. `MaintenanceEvaluator` las combina con el catálogo y con
//! una fuente de registros de servicio.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::catalog::{MaintenanceTask, VehicleCatalog};
use crate::utils::errors::AppError;

/// Odómetro base de una tarea que nunca se ha hecho
pub const NEVER_SERVICED_BASELINE_KM: i64 = 0;

/// task_name → odómetro del último servicio
pub type ServiceHistory = HashMap<String, i64>;

/// Estado calculado de una tarea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskStatus {
    UpToDate,
    Due { last_service_odo_km: i64 },
}

impl TaskStatus {
    pub fn is_due(&self) -> bool {
        matches!(self, TaskStatus::Due { .. })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::UpToDate => write!(f, "Up to date"),
            TaskStatus::Due { last_service_odo_km } => {
                write!(f, "Due (last serviced at {} km)", last_service_odo_km)
            }
        }
    }
}

/// Ciclo de vida de una tarea para un (usuario, vehículo). No se guarda:
/// se recalcula en cada consulta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLifecycle {
    NeverServiced,
    Serviced,
    Due,
}

/// Resultado de `compute_status` para una tarea
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusEntry {
    pub task_name: String,
    pub interval_km: i64,
    pub last_service_odo_km: Option<i64>,
    pub status: TaskStatus,
    pub lifecycle: TaskLifecycle,
    pub label: String,
}

/// Tarea que acaba de vencer tras una lectura de odómetro
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueTask {
    pub vehicle_name: String,
    pub task_name: String,
    pub next_due_odo_km: i64,
}

impl DueTask {
    /// Texto con el vehículo delante, como se muestra tras actualizar lecturas
    pub fn with_vehicle(&self) -> String {
        format!("{}: {}", self.vehicle_name, self)
    }
}

impl fmt::Display for DueTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Due at {} km)", self.task_name, self.next_due_odo_km)
    }
}

fn is_due(odometer_km: i64, last_service_odo_km: i64, interval_km: i64) -> bool {
    odometer_km - last_service_odo_km >= interval_km
}

/// Estado de cada tarea del catálogo, en el orden del catálogo
pub fn compute_status(
    current_odo_km: i64,
    tasks: &[MaintenanceTask],
    records: &ServiceHistory,
) -> Vec<TaskStatusEntry> {
    tasks
        .iter()
        .map(|task| {
            let recorded = records.get(&task.task_name).copied();
            let last_service = recorded.unwrap_or(NEVER_SERVICED_BASELINE_KM);

            let status = if is_due(current_odo_km, last_service, task.interval_km) {
                TaskStatus::Due {
                    last_service_odo_km: last_service,
                }
            } else {
                TaskStatus::UpToDate
            };

            let lifecycle = match (status.is_due(), recorded) {
                (true, _) => TaskLifecycle::Due,
                (false, Some(_)) => TaskLifecycle::Serviced,
                (false, None) => TaskLifecycle::NeverServiced,
            };

            TaskStatusEntry {
                task_name: task.task_name.clone(),
                interval_km: task.interval_km,
                last_service_odo_km: recorded,
                status,
                lifecycle,
                label: status.to_string(),
            }
        })
        .collect()
}

/// Tareas vencidas tras pasar de `old_odo_km` a `new_odo_km`.
///
/// Solo se evalúa si la lectura sube: una bajada o una lectura igual nunca
/// genera avisos. Llamar dos veces con el mismo par devuelve lo mismo; evitar
/// avisos duplicados es cosa del llamador.
pub fn detect_newly_due(
    vehicle_name: &str,
    old_odo_km: i64,
    new_odo_km: i64,
    tasks: &[MaintenanceTask],
    records: &ServiceHistory,
) -> Vec<DueTask> {
    if new_odo_km <= old_odo_km {
        return Vec::new();
    }

    tasks
        .iter()
        .filter_map(|task| {
            let last_service = records
                .get(&task.task_name)
                .copied()
                .unwrap_or(NEVER_SERVICED_BASELINE_KM);

            is_due(new_odo_km, last_service, task.interval_km).then(|| DueTask {
                vehicle_name: vehicle_name.to_string(),
                task_name: task.task_name.clone(),
                next_due_odo_km: last_service.saturating_add(task.interval_km),
            })
        })
        .collect()
}

/// Fuente de los registros de servicio de un usuario
#[async_trait]
pub trait ServiceRecordSource: Send + Sync {
    async fn get_service_records(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
    ) -> Result<ServiceHistory, AppError>;
}

/// Evaluador ligado a un catálogo y a una fuente de registros
pub struct MaintenanceEvaluator<S> {
    catalog: Arc<VehicleCatalog>,
    records: S,
}

impl<S: ServiceRecordSource> MaintenanceEvaluator<S> {
    pub fn new(catalog: Arc<VehicleCatalog>, records: S) -> Self {
        Self { catalog, records }
    }

    /// `compute_status` para un vehículo del usuario; vacío si el vehículo
    /// no está en el catálogo
    pub async fn status_for(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
        current_odo_km: i64,
    ) -> Result<Vec<TaskStatusEntry>, AppError> {
        let tasks = self.catalog.get_task_catalog(vehicle_name);
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let history = self.records.get_service_records(user_id, vehicle_name).await?;
        Ok(compute_status(current_odo_km, tasks, &history))
    }

    /// `detect_newly_due` para un vehículo del usuario
    pub async fn newly_due_for(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
        old_odo_km: i64,
        new_odo_km: i64,
    ) -> Result<Vec<DueTask>, AppError> {
        let tasks = self.catalog.get_task_catalog(vehicle_name);
        if tasks.is_empty() || new_odo_km <= old_odo_km {
            return Ok(Vec::new());
        }

        let history = self.records.get_service_records(user_id, vehicle_name).await?;
        Ok(detect_newly_due(vehicle_name, old_odo_km, new_odo_km, tasks, &history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oil_change() -> Vec<MaintenanceTask> {
        vec![MaintenanceTask::new("Oil Change", 5000)]
    }

    fn history(entries: &[(&str, i64)]) -> ServiceHistory {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_never_serviced_uses_zero_baseline() {
        let status = compute_status(4999, &oil_change(), &ServiceHistory::new());
        assert_eq!(status[0].status, TaskStatus::UpToDate);
        assert_eq!(status[0].label, "Up to date");
        assert_eq!(status[0].lifecycle, TaskLifecycle::NeverServiced);
        assert_eq!(status[0].last_service_odo_km, None);

        let status = compute_status(5000, &oil_change(), &ServiceHistory::new());
        assert_eq!(
            status[0].status,
            TaskStatus::Due {
                last_service_odo_km: 0
            }
        );
        assert_eq!(status[0].label, "Due (last serviced at 0 km)");
        assert_eq!(status[0].lifecycle, TaskLifecycle::Due);
    }

    #[test]
    fn test_serviced_task_counts_from_last_service() {
        let records = history(&[("Oil Change", 5000)]);

        let status = compute_status(9999, &oil_change(), &records);
        assert_eq!(status[0].status, TaskStatus::UpToDate);
        assert_eq!(status[0].lifecycle, TaskLifecycle::Serviced);
        assert_eq!(status[0].last_service_odo_km, Some(5000));

        let status = compute_status(10000, &oil_change(), &records);
        assert_eq!(status[0].label, "Due (last serviced at 5000 km)");
    }

    #[test]
    fn test_status_keeps_catalog_order() {
        let tasks = vec![
            MaintenanceTask::new("Oil Change", 10000),
            MaintenanceTask::new("Tyre Rotation", 15000),
            MaintenanceTask::new("Battery Check", 20000),
        ];
        let status = compute_status(16000, &tasks, &ServiceHistory::new());

        let names: Vec<&str> = status.iter().map(|s| s.task_name.as_str()).collect();
        assert_eq!(names, vec!["Oil Change", "Tyre Rotation", "Battery Check"]);
        let due: Vec<bool> = status.iter().map(|s| s.status.is_due()).collect();
        assert_eq!(due, vec![true, true, false]);
    }

    #[test]
    fn test_status_is_monotonic_in_odometer() {
        let tasks = vec![
            MaintenanceTask::new("Chain Oil", 500),
            MaintenanceTask::new("Brake Adjustment", 1000),
        ];
        let records = history(&[("Chain Oil", 1200)]);

        let mut was_due = vec![false; tasks.len()];
        for odo in (0..5000).step_by(50) {
            let status = compute_status(odo, &tasks, &records);
            for (i, entry) in status.iter().enumerate() {
                assert!(!(was_due[i] && !entry.status.is_due()), "task {} flipped back at {}", i, odo);
                was_due[i] = entry.status.is_due();
            }
        }
        assert!(was_due.iter().all(|d| *d));
    }

    #[test]
    fn test_odometer_below_last_service_is_up_to_date() {
        let records = history(&[("Oil Change", 8000)]);
        let status = compute_status(3000, &oil_change(), &records);
        assert_eq!(status[0].status, TaskStatus::UpToDate);
    }

    #[test]
    fn test_detect_newly_due() {
        let records = history(&[("Oil Change", 5000)]);

        let due = detect_newly_due("Bike_01", 9000, 10000, &oil_change(), &records);
        let labels: Vec<String> = due.iter().map(|d| d.to_string()).collect();
        assert_eq!(labels, vec!["Oil Change (Due at 10000 km)"]);
        assert_eq!(due[0].with_vehicle(), "Bike_01: Oil Change (Due at 10000 km)");
        assert_eq!(due[0].next_due_odo_km, 10000);

        assert!(detect_newly_due("Bike_01", 9000, 9999, &oil_change(), &records).is_empty());
    }

    #[test]
    fn test_detect_newly_due_ignores_rollback_and_equal_readings() {
        let records = history(&[("Oil Change", 5000)]);
        assert!(detect_newly_due("Bike_01", 10000, 9000, &oil_change(), &records).is_empty());
        assert!(detect_newly_due("Bike_01", 12000, 12000, &oil_change(), &records).is_empty());
        // una bajada no avisa aunque la tarea ya esté vencida
        assert!(detect_newly_due("Bike_01", 30000, 20000, &oil_change(), &ServiceHistory::new()).is_empty());
    }

    #[test]
    fn test_detect_newly_due_is_repeatable() {
        let records = ServiceHistory::new();
        let first = detect_newly_due("Bike_01", 0, 6000, &oil_change(), &records);
        let second = detect_newly_due("Bike_01", 0, 6000, &oil_change(), &records);
        assert_eq!(first, second);
        assert_eq!(first[0].next_due_odo_km, 5000);
    }

    struct FixedRecords(ServiceHistory);

    #[async_trait]
    impl ServiceRecordSource for FixedRecords {
        async fn get_service_records(
            &self,
            _user_id: Uuid,
            _vehicle_name: &str,
        ) -> Result<ServiceHistory, AppError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_evaluator_uses_catalog_and_records() {
        let catalog = Arc::new(VehicleCatalog::builtin().unwrap());
        let evaluator = MaintenanceEvaluator::new(
            catalog,
            FixedRecords(history(&[("Oil Change", 5000)])),
        );
        let user = Uuid::new_v4();

        let status = evaluator.status_for(user, "Bike_01", 6200).await.unwrap();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].label, "Up to date");
        assert_eq!(status[1].label, "Due (last serviced at 0 km)");

        let due = evaluator.newly_due_for(user, "Bike_01", 6000, 10000).await.unwrap();
        let labels: Vec<String> = due.iter().map(DueTask::with_vehicle).collect();
        assert_eq!(
            labels,
            vec![
                "Bike_01: Oil Change (Due at 10000 km)",
                "Bike_01: Chain Lubrication (Due at 1000 km)"
            ]
        );
    }

    #[tokio::test]
    async fn test_evaluator_unknown_vehicle_is_empty() {
        let catalog = Arc::new(VehicleCatalog::builtin().unwrap());
        let evaluator = MaintenanceEvaluator::new(catalog, FixedRecords(ServiceHistory::new()));
        let user = Uuid::new_v4();

        assert!(evaluator.status_for(user, "Truck_99", 50000).await.unwrap().is_empty());
        assert!(evaluator.newly_due_for(user, "Truck_99", 0, 50000).await.unwrap().is_empty());
    }
}

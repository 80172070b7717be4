use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::{
    CatalogResponse, DashboardResponse, MaintenanceStatusResponse, MarkServicedRequest,
    UpdateOdometersRequest, UpdateOdometersResponse,
};
use crate::models::catalog::VehicleCatalog;
use crate::models::service_record::ServiceRecord;
use crate::models::user_vehicle::UserVehicle;
use crate::repositories::{ServiceRecordRepository, UserVehicleRepository};
use crate::services::maintenance_evaluator::MaintenanceEvaluator;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_odometer, OdometerInputPolicy};

pub struct MaintenanceController {
    vehicles: UserVehicleRepository,
    records: ServiceRecordRepository,
    evaluator: MaintenanceEvaluator<ServiceRecordRepository>,
    catalog: Arc<VehicleCatalog>,
    odometer_policy: OdometerInputPolicy,
}

impl MaintenanceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: UserVehicleRepository::new(state.pool.clone()),
            records: ServiceRecordRepository::new(state.pool.clone()),
            evaluator: MaintenanceEvaluator::new(
                state.catalog.clone(),
                ServiceRecordRepository::new(state.pool.clone()),
            ),
            catalog: state.catalog.clone(),
            odometer_policy: state.config.odometer_policy,
        }
    }

    pub fn catalog(&self) -> CatalogResponse {
        CatalogResponse {
            vehicles: self.catalog.vehicles().to_vec(),
        }
    }

    pub async fn dashboard(&self, user_id: Uuid) -> Result<DashboardResponse, AppError> {
        Ok(DashboardResponse {
            vehicles: self.catalog.vehicle_names().map(str::to_string).collect(),
            user_vehicles: self.vehicles.find_by_user(user_id).await?,
            service_records: self.records.find_by_user(user_id).await?,
        })
    }

    /// Aplicar las lecturas enviadas a todos los vehículos del catálogo:
    /// actualizar, crear o quitar, y avisar de lo que vence al subir el odómetro
    pub async fn update_odometers(
        &self,
        user_id: Uuid,
        request: UpdateOdometersRequest,
    ) -> Result<ApiResponse<UpdateOdometersResponse>, AppError> {
        for name in request.readings.keys() {
            if !self.catalog.contains(name) {
                tracing::debug!("Vehículo desconocido ignorado: {}", name);
            }
        }

        // primero se interpretan todas las lecturas: en modo estricto una
        // lectura inválida no debe dejar la actualización a medias
        let mut readings: HashMap<&str, i64> = HashMap::new();
        for name in self.catalog.vehicle_names() {
            if let Some(input) = request.readings.get(name) {
                readings.insert(name, parse_odometer(input, self.odometer_policy)?);
            }
        }

        let mut registered: HashMap<String, UserVehicle> = self
            .vehicles
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|v| (v.vehicle_name.clone(), v))
            .collect();

        // los avisos se calculan antes de escribir: los registros de servicio
        // no cambian en esta operación
        let mut due_tasks = Vec::new();
        for name in self.catalog.vehicle_names() {
            if let (Some(&odometer_km), Some(existing)) = (readings.get(name), registered.get(name)) {
                due_tasks.extend(
                    self.evaluator
                        .newly_due_for(user_id, name, existing.odometer_km, odometer_km)
                        .await?,
                );
            }
        }

        // todas las escrituras en una sola transacción
        let mut tx = self.vehicles.begin().await?;
        let mut vehicles = Vec::new();
        let mut removed = Vec::new();

        for name in self.catalog.vehicle_names() {
            match (readings.get(name).copied(), registered.remove(name)) {
                (Some(odometer_km), Some(existing)) => {
                    vehicles.push(
                        self.vehicles
                            .update_odometer(&mut *tx, existing.id, odometer_km)
                            .await?,
                    );
                }
                (Some(odometer_km), None) => {
                    vehicles.push(self.vehicles.create(&mut *tx, user_id, name, odometer_km).await?);
                }
                (None, Some(existing)) => {
                    self.vehicles.delete(&mut *tx, existing.id).await?;
                    removed.push(existing.vehicle_name);
                }
                (None, None) => {}
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing odometer update: {}", e)))?;

        if !due_tasks.is_empty() {
            tracing::info!("🔧 {} tareas vencidas para {}", due_tasks.len(), user_id);
        }

        let response = UpdateOdometersResponse {
            vehicles,
            removed,
            due_services: due_tasks.iter().map(|d| d.with_vehicle()).collect(),
            due_tasks,
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Vehicle odometer readings updated",
        ))
    }

    /// Registrar una tarea como hecha al odómetro actual del vehículo
    pub async fn mark_serviced(
        &self,
        user_id: Uuid,
        request: MarkServicedRequest,
    ) -> Result<ApiResponse<ServiceRecord>, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find(user_id, &request.vehicle_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' is not registered", request.vehicle_name)))?;

        let task = self
            .catalog
            .get(&vehicle.vehicle_name)
            .and_then(|entry| entry.find_task(&request.task_name))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Task '{}' does not exist for vehicle '{}'",
                    request.task_name, vehicle.vehicle_name
                ))
            })?;

        let record = self
            .records
            .upsert(user_id, &vehicle.vehicle_name, &task.task_name, vehicle.odometer_km)
            .await?;

        let message = format!("{} for {} marked as serviced", task.task_name, vehicle.vehicle_name);
        Ok(ApiResponse::success_with_message(record, message))
    }

    /// Estado de las tareas de un vehículo del usuario; vacío si no lo tiene
    pub async fn status(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
    ) -> Result<MaintenanceStatusResponse, AppError> {
        let Some(vehicle) = self.vehicles.find(user_id, vehicle_name).await? else {
            return Ok(MaintenanceStatusResponse {
                vehicle_name: vehicle_name.to_string(),
                odometer_km: None,
                tasks: Vec::new(),
            });
        };

        let tasks = self
            .evaluator
            .status_for(user_id, &vehicle.vehicle_name, vehicle.odometer_km)
            .await?;

        Ok(MaintenanceStatusResponse {
            vehicle_name: vehicle.vehicle_name,
            odometer_km: Some(vehicle.odometer_km),
            tasks,
        })
    }
}

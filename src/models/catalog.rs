//! Catálogo de mantenimiento de vehículos
//!
//! Tabla de solo lectura vehículo → tareas con su intervalo en km. Se inyecta
//! en el estado de la aplicación y puede cargarse desde un archivo JSON sin
//! tocar el código; si no hay archivo se usa la tabla embebida.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../data/vehicle_catalog.json");

/// Errores al cargar o validar un catálogo
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Vehicle name cannot be empty")]
    EmptyVehicleName,

    #[error("Vehicle '{0}' is defined more than once")]
    DuplicateVehicle(String),

    #[error("Vehicle '{vehicle}' has a task with an empty name")]
    EmptyTaskName { vehicle: String },

    #[error("Task '{task}' is defined more than once for vehicle '{vehicle}'")]
    DuplicateTask { vehicle: String, task: String },

    #[error("Task '{task}' of vehicle '{vehicle}' has a non-positive interval ({interval_km} km)")]
    InvalidInterval {
        vehicle: String,
        task: String,
        interval_km: i64,
    },
}

/// Una tarea de mantenimiento con su intervalo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub task_name: String,
    pub interval_km: i64,
}

impl MaintenanceTask {
    pub fn new(task_name: impl Into<String>, interval_km: i64) -> Self {
        Self {
            task_name: task_name.into(),
            interval_km,
        }
    }
}

/// Vehículo del catálogo con sus tareas en orden
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCatalogEntry {
    pub vehicle_name: String,
    pub tasks: Vec<MaintenanceTask>,
}

impl VehicleCatalogEntry {
    pub fn find_task(&self, task_name: &str) -> Option<&MaintenanceTask> {
        self.tasks.iter().find(|t| t.task_name == task_name)
    }
}

/// Catálogo completo, ya validado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCatalog {
    vehicles: Vec<VehicleCatalogEntry>,
}

impl VehicleCatalog {
    /// Construir y validar un catálogo
    pub fn new(vehicles: Vec<VehicleCatalogEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { vehicles };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Tabla embebida en el binario
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: VehicleCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Cargar desde archivo si se configuró uno, si no la tabla embebida
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_vehicles = HashSet::new();

        for vehicle in &self.vehicles {
            if vehicle.vehicle_name.trim().is_empty() {
                return Err(CatalogError::EmptyVehicleName);
            }
            if !seen_vehicles.insert(vehicle.vehicle_name.as_str()) {
                return Err(CatalogError::DuplicateVehicle(vehicle.vehicle_name.clone()));
            }

            let mut seen_tasks = HashSet::new();
            for task in &vehicle.tasks {
                if task.task_name.trim().is_empty() {
                    return Err(CatalogError::EmptyTaskName {
                        vehicle: vehicle.vehicle_name.clone(),
                    });
                }
                if !seen_tasks.insert(task.task_name.as_str()) {
                    return Err(CatalogError::DuplicateTask {
                        vehicle: vehicle.vehicle_name.clone(),
                        task: task.task_name.clone(),
                    });
                }
                if task.interval_km <= 0 {
                    return Err(CatalogError::InvalidInterval {
                        vehicle: vehicle.vehicle_name.clone(),
                        task: task.task_name.clone(),
                        interval_km: task.interval_km,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn vehicles(&self) -> &[VehicleCatalogEntry] {
        &self.vehicles
    }

    pub fn vehicle_names(&self) -> impl Iterator<Item = &str> {
        self.vehicles.iter().map(|v| v.vehicle_name.as_str())
    }

    pub fn get(&self, vehicle_name: &str) -> Option<&VehicleCatalogEntry> {
        self.vehicles.iter().find(|v| v.vehicle_name == vehicle_name)
    }

    pub fn contains(&self, vehicle_name: &str) -> bool {
        self.get(vehicle_name).is_some()
    }

    /// Tareas de un vehículo; vacío si el vehículo no existe
    pub fn get_task_catalog(&self, vehicle_name: &str) -> &[MaintenanceTask] {
        self.get(vehicle_name)
            .map(|v| v.tasks.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let names: Vec<&str> = catalog.vehicle_names().collect();
        assert_eq!(names, vec!["Bike_01", "Bike_02", "Car_01", "Car_02", "Bicycle_01"]);

        let car = catalog.get_task_catalog("Car_01");
        assert_eq!(car.len(), 3);
        assert_eq!(car[0], MaintenanceTask::new("Oil Change", 10000));
        assert_eq!(car[2], MaintenanceTask::new("Battery Check", 20000));
    }

    #[test]
    fn test_unknown_vehicle_has_no_tasks() {
        let catalog = VehicleCatalog::builtin().unwrap();
        assert!(catalog.get_task_catalog("Truck_99").is_empty());
        assert!(!catalog.contains("Truck_99"));
    }

    #[test]
    fn test_rejects_invalid_catalogs() {
        let zero_interval = r#"{"vehicles":[{"vehicle_name":"Bike","tasks":[{"task_name":"Oil","interval_km":0}]}]}"#;
        assert!(matches!(
            VehicleCatalog::from_json(zero_interval),
            Err(CatalogError::InvalidInterval { .. })
        ));

        let duplicate_task = r#"{"vehicles":[{"vehicle_name":"Bike","tasks":[
            {"task_name":"Oil","interval_km":10},{"task_name":"Oil","interval_km":20}]}]}"#;
        assert!(matches!(
            VehicleCatalog::from_json(duplicate_task),
            Err(CatalogError::DuplicateTask { .. })
        ));

        let duplicate_vehicle = VehicleCatalog::new(vec![
            VehicleCatalogEntry { vehicle_name: "Bike".into(), tasks: vec![] },
            VehicleCatalogEntry { vehicle_name: "Bike".into(), tasks: vec![] },
        ]);
        assert!(matches!(duplicate_vehicle, Err(CatalogError::DuplicateVehicle(_))));

        assert!(matches!(
            VehicleCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vehicles":[{{"vehicle_name":"Scooter_01","tasks":[{{"task_name":"Belt Check","interval_km":3000}}]}}]}}"#
        )
        .unwrap();

        let catalog = VehicleCatalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.vehicles().len(), 1);
        assert_eq!(
            catalog.get("Scooter_01").and_then(|v| v.find_task("Belt Check")),
            Some(&MaintenanceTask::new("Belt Check", 3000))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = VehicleCatalog::load(Some(Path::new("/nonexistent/catalog.json")));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}

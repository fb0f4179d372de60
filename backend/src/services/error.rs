//! Error taxonomy of the schedule engine.
//!
//! Callers only need to tell three outcomes apart (not found, malformed input,
//! business rule violation) plus the stable rule code of a violation.
//! Storage failures pass through untouched.

use std::fmt;

use crate::db::repository::RepositoryError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stable codes of business rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    /// The owning school year is CERRADO.
    AnioEscolarCerrado,
    /// More than one ALMUERZO block in a day.
    JornadaMultiplesAlmuerzos,
    /// A day without any CLASE block.
    JornadaSinClases,
    /// First or last block of a day is not CLASE.
    JornadaExtremoNoEsClase,
    /// The addressed weekday has no active blocks.
    DiaSinHorario,
    /// A copy destination is invalid or equals the source.
    DiaDestinoInvalido,
    BloqueNoEsClase,
    MateriaNoEnMalla,
    MateriaExcedeMinutosMalla,
    BloqueSinMateriaParaProfesor,
    ProfesorInactivo,
    ProfesorNoEnsenaMateria,
    ProfesorColisionHorario,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::AnioEscolarCerrado => "ANIO_ESCOLAR_CERRADO",
            RuleCode::JornadaMultiplesAlmuerzos => "JORNADA_MULTIPLES_ALMUERZOS",
            RuleCode::JornadaSinClases => "JORNADA_SIN_CLASES",
            RuleCode::JornadaExtremoNoEsClase => "JORNADA_EXTREMO_NO_ES_CLASE",
            RuleCode::DiaSinHorario => "DIA_SIN_HORARIO",
            RuleCode::DiaDestinoInvalido => "DIA_DESTINO_INVALIDO",
            RuleCode::BloqueNoEsClase => "BLOQUE_NO_ES_CLASE",
            RuleCode::MateriaNoEnMalla => "MATERIA_NO_EN_MALLA",
            RuleCode::MateriaExcedeMinutosMalla => "MATERIA_EXCEDE_MINUTOS_MALLA",
            RuleCode::BloqueSinMateriaParaProfesor => "BLOQUE_SIN_MATERIA_PARA_PROFESOR",
            RuleCode::ProfesorInactivo => "PROFESOR_INACTIVO",
            RuleCode::ProfesorNoEnsenaMateria => "PROFESOR_NO_ENSENA_MATERIA",
            RuleCode::ProfesorColisionHorario => "PROFESOR_COLISION_HORARIO",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    BusinessRuleViolation,
    Internal,
}

/// Error type for schedule engine operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("{code}: {message}")]
    BusinessRule { code: RuleCode, message: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn rule(code: RuleCode, message: impl Into<String>) -> Self {
        Self::BusinessRule {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::BusinessRule { .. } => ErrorKind::BusinessRuleViolation,
            Self::Repository(e) if e.is_not_found() => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// The rule code when this is a business rule violation.
    pub fn rule_code(&self) -> Option<RuleCode> {
        match self {
            Self::BusinessRule { code, .. } => Some(*code),
            _ => None,
        }
    }
}

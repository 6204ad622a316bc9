//! Request and response shapes for the student API.
//!
//! All JSON keys are camelCase (`studentId`, `firstName`, `gradeId`, ...).
//! The projection views double as partial-update bodies: each one implements
//! [`MergeIntoActiveModel`] and only writes the columns it exposes.

use sea_orm::{ActiveValue, DbErr, FromQueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{ActiveModel, Model};
use crate::traits::MergeIntoActiveModel;

fn default_active() -> bool {
    true
}

/// A stored student, as returned by the API and accepted by full update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub grade_id: i32,
    pub active: bool,
}

impl Student {
    /// A student is live until soft-deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.active
    }
}

impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            student_id: model.student_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            grade_id: model.grade_id,
            active: model.active,
        }
    }
}

/// Full update: every mutable column is overwritten, `active` included.
impl MergeIntoActiveModel<ActiveModel> for Student {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        existing.first_name = ActiveValue::Set(self.first_name);
        existing.last_name = ActiveValue::Set(self.last_name);
        existing.phone = ActiveValue::Set(self.phone);
        existing.email = ActiveValue::Set(self.email);
        existing.active = ActiveValue::Set(self.active);
        existing.grade_id = ActiveValue::Set(self.grade_id);
        Ok(existing)
    }
}

/// Body for creating a student.
///
/// `studentId` is normally omitted and assigned by the store; `0` counts as
/// omitted. `active` defaults to `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreate {
    #[serde(default)]
    pub student_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub grade_id: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl From<StudentCreate> for ActiveModel {
    fn from(create: StudentCreate) -> Self {
        ActiveModel {
            student_id: create
                .student_id
                .filter(|id| *id != 0)
                .map_or(ActiveValue::NotSet, ActiveValue::Set),
            first_name: ActiveValue::Set(create.first_name),
            last_name: ActiveValue::Set(create.last_name),
            email: ActiveValue::Set(create.email),
            phone: ActiveValue::Set(create.phone),
            grade_id: ActiveValue::Set(create.grade_id),
            active: ActiveValue::Set(create.active),
        }
    }
}

/// Name and email projection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct NameEmailView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl MergeIntoActiveModel<ActiveModel> for NameEmailView {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        existing.first_name = ActiveValue::Set(self.first_name);
        existing.last_name = ActiveValue::Set(self.last_name);
        existing.email = ActiveValue::Set(self.email);
        Ok(existing)
    }
}

/// First name and grade projection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct NameGradeView {
    pub first_name: String,
    pub grade_id: i32,
}

impl MergeIntoActiveModel<ActiveModel> for NameGradeView {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        existing.first_name = ActiveValue::Set(self.first_name);
        existing.grade_id = ActiveValue::Set(self.grade_id);
        Ok(existing)
    }
}

/// Batch of students to create under a single grade.
///
/// Any `gradeId` on the individual students is replaced by the batch's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkInsertRequest {
    #[serde(alias = "idGrade")]
    pub grade_id: i32,
    #[serde(default)]
    pub students: Option<Vec<StudentCreate>>,
}

//! Dispatch of parsed commands to the domain services.

use std::sync::Arc;

use mockable::Clock;
use pagination::PageRequest;
use tracing::warn;

use super::render;
use super::{BrandsCommand, Command, ConsultCommand, ManagerCommand, SavedCommand};
use crate::domain::ports::{
    BrandCatalogue, ManagerConsultationApi, SavedBrandApi, UserConsultationApi,
};
use crate::domain::{
    BrandCatalogueService, BrandId, ConsultationRequestForm, ConsultationService, Error,
    IdValidationError, Identity, ManagerConsultationService, RescheduleForm, SaveStateBook,
    SavedBrandService, ServiceResult, SessionContext,
};

/// Every port the command line drives, implemented by one backend.
pub trait FranchiseBackend:
    BrandCatalogue + SavedBrandApi + UserConsultationApi + ManagerConsultationApi
{
}

impl<T> FranchiseBackend for T where
    T: BrandCatalogue + SavedBrandApi + UserConsultationApi + ManagerConsultationApi
{
}

/// Runs commands against one backend and session.
pub struct CliRunner<B> {
    session: SessionContext,
    catalogue: BrandCatalogueService<B>,
    saved: SavedBrandService<B>,
    consultations: ConsultationService<B>,
    manager: ManagerConsultationService<B>,
    default_page: PageRequest,
}

impl<B> CliRunner<B>
where
    B: FranchiseBackend,
{
    pub fn new(
        backend: Arc<B>,
        session: SessionContext,
        clock: Arc<dyn Clock>,
        default_page: PageRequest,
    ) -> Self {
        Self {
            catalogue: BrandCatalogueService::new(Arc::clone(&backend)),
            saved: SavedBrandService::new(
                Arc::clone(&backend),
                session.clone(),
                SaveStateBook::new(),
            ),
            consultations: ConsultationService::new(
                Arc::clone(&backend),
                session.clone(),
                Arc::clone(&clock),
            ),
            manager: ManagerConsultationService::new(backend, session.clone(), clock),
            session,
            default_page,
        }
    }

    /// Perform `command` and return the text to print.
    ///
    /// # Errors
    ///
    /// Returns the user-facing [`Error`] of the failed operation.
    pub async fn run(&self, command: Command) -> ServiceResult<String> {
        match command {
            Command::Brands(command) => self.brands(command).await,
            Command::Saved(command) => self.saved(command).await,
            Command::Consult(command) => self.consult(command).await,
            Command::Manager(command) => self.manage(command).await,
        }
    }

    async fn brands(&self, command: BrandsCommand) -> ServiceResult<String> {
        let page = match command {
            BrandsCommand::List(args) => self.catalogue.browse(args.request(self.default_page)).await?,
            BrandsCommand::Search { keyword, page } => {
                self.catalogue
                    .search(&keyword, page.request(self.default_page))
                    .await?
            }
            BrandsCommand::Category { category_id, page } => {
                self.catalogue
                    .by_category(parse_id(category_id)?, page.request(self.default_page))
                    .await?
            }
            BrandsCommand::Show { brand_id } => {
                let detail = self.catalogue.detail(parse_id(brand_id)?).await?;
                return Ok(render::brand_detail(&detail));
            }
            BrandsCommand::Categories => {
                let categories = self.catalogue.categories().await?;
                return Ok(render::categories(&categories));
            }
        };

        if matches!(self.session.current(), Some(Identity::User(_))) {
            let listed: Vec<BrandId> = page.content.iter().map(|brand| brand.id).collect();
            if let Err(error) = self.saved.refresh(&listed).await {
                warn!(error = %error, "saved flags unavailable for brand listing");
            }
        }
        Ok(render::brand_page(&page, self.saved.book()))
    }

    async fn saved(&self, command: SavedCommand) -> ServiceResult<String> {
        match command {
            SavedCommand::List(args) => {
                let page = self.saved.saved_brands(args.request(self.default_page)).await?;
                Ok(render::brand_page(&page, self.saved.book()))
            }
            SavedCommand::Status { brand_ids } => {
                let brands = brand_ids
                    .into_iter()
                    .map(parse_id)
                    .collect::<ServiceResult<Vec<BrandId>>>()?;
                let flags = self.saved.refresh(&brands).await?;
                Ok(render::save_flags(&flags))
            }
            SavedCommand::Toggle {
                brand_id,
                detail: false,
            } => {
                let saved = self.saved.toggle(parse_id(brand_id)?).await?;
                Ok(render::toggled(saved).to_owned())
            }
            SavedCommand::Toggle {
                brand_id,
                detail: true,
            } => {
                let brand = parse_id(brand_id)?;
                self.saved.refresh(&[brand]).await?;
                let mut detail = self.catalogue.detail(brand).await?;
                let saved = self.saved.toggle_brand(&mut detail.brand).await?;
                Ok(format!(
                    "{}\n{}",
                    render::toggled(saved),
                    render::brand_detail(&detail)
                ))
            }
        }
    }

    async fn consult(&self, command: ConsultCommand) -> ServiceResult<String> {
        let (message, updated) = match command {
            ConsultCommand::Request {
                brand_id,
                date,
                time,
                message,
            } => {
                let form = ConsultationRequestForm {
                    brand_id: Some(parse_id(brand_id)?),
                    preferred_date: date,
                    preferred_time: time,
                    message,
                };
                (
                    render::CONSULTATION_REQUESTED,
                    self.consultations.request(&form).await?,
                )
            }
            ConsultCommand::List(args) => {
                let page = self.consultations.list(args.request(self.default_page)).await?;
                return Ok(render::consultation_page(&page));
            }
            ConsultCommand::Show { id } => {
                let consultation = self.consultations.show(parse_id(id)?).await?;
                return Ok(render::consultation(&consultation));
            }
            ConsultCommand::Accept { id } => (
                render::CONSULTATION_CONFIRMED,
                self.consultations.accept(parse_id(id)?).await?,
            ),
            ConsultCommand::Reject { id } => (
                render::CONSULTATION_CANCELLED,
                self.consultations.reject(parse_id(id)?).await?,
            ),
            ConsultCommand::Cancel { id } => (
                render::CONSULTATION_CANCELLED,
                self.consultations.cancel(parse_id(id)?).await?,
            ),
        };
        Ok(render::acknowledged(message, &updated))
    }

    async fn manage(&self, command: ManagerCommand) -> ServiceResult<String> {
        let (message, updated) = match command {
            ManagerCommand::List(args) => {
                let board = self.manager.board(args.request(self.default_page)).await?;
                return Ok(render::board(&board));
            }
            ManagerCommand::Show { id } => {
                let consultation = self.manager.find(parse_id(id)?).await?;
                return Ok(render::consultation(&consultation));
            }
            ManagerCommand::Confirm { id } => (
                render::CONSULTATION_CONFIRMED,
                self.manager.confirm(parse_id(id)?).await?,
            ),
            ManagerCommand::Reschedule {
                id,
                date,
                time,
                reason,
                note,
            } => {
                let form = RescheduleForm {
                    adjusted_date: date,
                    adjusted_time: time,
                    adjustment_reason: reason.unwrap_or_default(),
                    manager_note: note.unwrap_or_default(),
                };
                (
                    render::RESCHEDULE_SENT,
                    self.manager.propose_reschedule(parse_id(id)?, &form).await?,
                )
            }
            ManagerCommand::Cancel { id } => (
                render::CONSULTATION_CANCELLED,
                self.manager.cancel(parse_id(id)?).await?,
            ),
        };
        Ok(render::acknowledged(message, &updated))
    }
}

fn parse_id<T>(raw: i64) -> ServiceResult<T>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    T::try_from(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

//! Tag station facade
//!
//! Owns the options store, the session form, the print queue and the
//! output paths, and layers the operator dialogs on top of them.

use crate::core::Config;
use crate::export::ImageExporter;
use crate::options::{OptionsStore, RedbCatalogStorage};
use crate::printing::{PrintHost, PrintReceipt, PrintTarget};
use crate::prompt::UserPrompt;
use crate::session::{Preview, PrintQueue, SessionForm, TagPayload, display_label};
use crate::utils::print_error;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    BrandScope, Category, OptionCatalog, QueueEntry, Selection, SelectionField, SelectionState,
};
use std::path::PathBuf;
use tag_printer::{Barcode, BarcodeOptions, RasterFormat};
use tracing::{debug, info, instrument};

pub struct TagStation<H = PrintTarget> {
    options: OptionsStore,
    form: SessionForm,
    queue: PrintQueue,
    prompt: Box<dyn UserPrompt>,
    exporter: ImageExporter,
    host: H,
    barcode_options: BarcodeOptions,
}

impl TagStation<PrintTarget> {
    /// Open the configured catalog database and output paths
    #[instrument(skip_all, fields(data_file = %config.data_file))]
    pub fn open(config: &Config, prompt: Box<dyn UserPrompt>) -> AppResult<Self> {
        let data_path = config.data_path();
        if let Some(parent) = data_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let storage = RedbCatalogStorage::open(&data_path)?;
        let options = OptionsStore::load(Box::new(storage))?;
        let host = PrintTarget::from_config(config)?;
        info!(print_host = %host.describe(), "Tag station ready");

        Ok(Self::new(
            options,
            prompt,
            ImageExporter::new(config.export_path()),
            host,
        ))
    }
}

impl<H: PrintHost> TagStation<H> {
    pub fn new(
        options: OptionsStore,
        prompt: Box<dyn UserPrompt>,
        exporter: ImageExporter,
        host: H,
    ) -> Self {
        Self {
            options,
            form: SessionForm::new(),
            queue: PrintQueue::new(),
            prompt,
            exporter,
            host,
            barcode_options: BarcodeOptions::default(),
        }
    }

    // ========== Accessors ==========

    pub fn catalog(&self) -> &OptionCatalog {
        self.options.catalog()
    }

    pub fn selection(&self) -> &Selection {
        self.form.selection()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.form.state()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.form.preview()
    }

    pub fn queue(&self) -> &[QueueEntry] {
        self.queue.entries()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn scope(&self) -> BrandScope {
        self.options.brand_scope()
    }

    fn selected_type(&self) -> Option<&str> {
        self.form.get(SelectionField::Type)
    }

    /// Options the dropdown for `category` currently shows
    pub fn entries(&self, category: Category) -> &[String] {
        self.options.entries(category, self.selected_type())
    }

    // ========== Options Store ==========

    /// Prompt for a new option and add it
    ///
    /// Type-scoped brands go into the list of the selected type. A cancelled
    /// or blank answer changes nothing and returns `Ok(None)`.
    #[instrument(skip(self))]
    pub fn add_entry(&mut self, category: Category) -> AppResult<Option<String>> {
        let scope_type = self.selected_type().map(str::to_string);

        let message = match (category, self.scope()) {
            (Category::Brands, BrandScope::ByType) => match &scope_type {
                Some(t) => format!("Enter new Brand for {}:", t),
                None => {
                    return Err(AppError::validation(
                        "Please select a Type first to add a brand to it.",
                    ));
                }
            },
            _ => format!("Enter new {}:", category.key()),
        };

        let Some(answer) = self.prompt.ask_text(&message) else {
            debug!("Add cancelled");
            return Ok(None);
        };
        self.options.add(category, scope_type.as_deref(), &answer)
    }

    /// Remove the option currently selected for `category`, after confirmation
    ///
    /// Returns `Ok(false)` when the operator declines.
    #[instrument(skip(self))]
    pub fn remove_entry(&mut self, category: Category) -> AppResult<bool> {
        let field = category.field();
        let Some(value) = self.form.get(field).map(str::to_string) else {
            return Err(AppError::required_field(
                "Select an item in the dropdown to remove.",
            ));
        };

        if !self.prompt.confirm(&format!("Remove \"{}\"?", value)) {
            debug!(value = %value, "Remove declined");
            return Ok(false);
        }

        let scope_type = self.selected_type().map(str::to_string);
        self.options.remove(category, &value, scope_type.as_deref())?;

        self.form.clear(field);
        if category == Category::Types && self.scope() == BrandScope::ByType {
            self.form.clear(SelectionField::Brand);
        }
        Ok(true)
    }

    // ========== Session Form ==========

    /// Set one form field to a catalog option (or clear it with `None`)
    pub fn select_field(&mut self, field: SelectionField, value: Option<&str>) -> AppResult<()> {
        let scope = self.scope();
        let value = value.map(str::trim).filter(|v| !v.is_empty());

        if let Some(v) = value {
            let category = field.category();
            if category == Category::Brands
                && scope == BrandScope::ByType
                && self.selected_type().is_none()
            {
                return Err(AppError::validation("Select Type First"));
            }
            if !self.options.contains(category, v, self.selected_type()) {
                return Err(AppError::with_message(
                    ErrorCode::OptionNotFound,
                    format!("\"{}\" is not a {} option", v, field.label()),
                )
                .with_detail("field", field.key()));
            }
        }

        self.form.select(field, value, scope);
        Ok(())
    }

    /// "Reset Form": clear all three fields
    pub fn reset_selection(&mut self) {
        self.form.reset();
    }

    /// Render the selection into the preview and append it to the queue
    #[instrument(skip(self))]
    pub fn generate(&mut self) -> AppResult<&QueueEntry> {
        let selection = self.form.selection();
        let (Some(branch), Some(device_type), Some(brand)) = (
            selection.branch.as_deref(),
            selection.device_type.as_deref(),
            selection.brand.as_deref(),
        ) else {
            let missing: Vec<&str> = selection.missing().iter().map(|f| f.key()).collect();
            return Err(AppError::required_field("Please fill all fields!")
                .with_detail("missing", missing.join(",")));
        };

        let payload = TagPayload::new(branch, device_type, brand);
        let label = display_label(branch, device_type, brand);
        let encoded = payload.to_string();

        let barcode = Barcode::render(&encoded, self.barcode_options.clone().with_text(&label))
            .map_err(print_error)?;
        let svg = barcode.to_svg();

        self.form.show(Preview {
            barcode,
            payload,
            label: label.clone(),
            svg: svg.clone(),
        });

        let entry = self.queue.push(svg, encoded, label);
        info!(id = entry.id, payload = %entry.payload, "Tag generated");
        Ok(entry)
    }

    // ========== Queue ==========

    /// Drop one queued tag; no confirmation
    pub fn remove_queue_entry(&mut self, id: u64) -> bool {
        self.queue.remove(id)
    }

    /// Empty the queue after confirmation
    ///
    /// An empty queue returns `false` without asking.
    pub fn clear_queue(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        if !self
            .prompt
            .confirm("Are you sure you want to clear the entire print queue?")
        {
            return false;
        }
        self.queue.clear();
        info!("Print queue cleared");
        true
    }

    // ========== Output ==========

    fn preview_barcode(&self) -> AppResult<&Barcode> {
        self.form
            .preview()
            .map(|p| &p.barcode)
            .ok_or_else(|| AppError::new(ErrorCode::NoPreview))
    }

    /// Export the preview as `Tag-<ts>.<ext>` and return the file path
    pub async fn export_image(&self, format: RasterFormat) -> AppResult<PathBuf> {
        let barcode = self.preview_barcode()?;
        self.exporter.export(barcode, format).await
    }

    /// Export the preview as a `data:` URL
    pub async fn export_data_url(&self, format: RasterFormat) -> AppResult<String> {
        let barcode = self.preview_barcode()?;
        self.exporter.data_url(barcode, format).await
    }

    /// Hand the queued tags (and nothing else) to the print host
    #[instrument(skip(self), fields(count = self.queue.len()))]
    pub async fn print_all(&self) -> AppResult<PrintReceipt> {
        if self.queue.is_empty() {
            return Err(AppError::new(ErrorCode::QueueEmpty));
        }
        let receipt = self.host.print(self.queue.entries()).await?;
        info!(destination = %receipt.destination, printed = receipt.printed, "Queue printed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MemoryCatalogStorage;
    use crate::printing::HtmlSheetHost;
    use crate::prompt::ScriptedPrompt;

    fn station(prompt: ScriptedPrompt) -> TagStation<HtmlSheetHost> {
        let options = OptionsStore::load(Box::new(MemoryCatalogStorage::new())).unwrap();
        TagStation::new(
            options,
            Box::new(prompt),
            ImageExporter::new("unused-exports"),
            HtmlSheetHost::new("unused-print"),
        )
    }

    fn select_all(s: &mut TagStation<HtmlSheetHost>, branch: &str, t: &str, brand: &str) {
        s.select_field(SelectionField::Branch, Some(branch)).unwrap();
        s.select_field(SelectionField::Type, Some(t)).unwrap();
        s.select_field(SelectionField::Brand, Some(brand)).unwrap();
    }

    #[test]
    fn test_generate_example() {
        let mut s = station(ScriptedPrompt::new());
        select_all(&mut s, "Cebu", "Ram", "Kingston");

        let entry = s.generate().unwrap().clone();
        assert_eq!(entry.payload, "CB|RM|Kingston");
        assert_eq!(entry.label, "Cebu - Ram - Kingston");
        assert!(entry.rendered_graphic.starts_with("<svg"));
        assert_eq!(s.queue().len(), 1);
        assert_eq!(s.preview().unwrap().svg, entry.rendered_graphic);
    }

    #[test]
    fn test_generate_incomplete() {
        let mut s = station(ScriptedPrompt::new());
        s.select_field(SelectionField::Branch, Some("Cebu")).unwrap();

        let err = s.generate().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Please fill all fields!");
        assert!(s.queue().is_empty());
        assert!(s.preview().is_none());
    }

    #[test]
    fn test_select_unknown_option() {
        let mut s = station(ScriptedPrompt::new());
        let err = s.select_field(SelectionField::Branch, Some("Makati")).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionNotFound);

        let err = s.select_field(SelectionField::Brand, Some("Kingston")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        s.select_field(SelectionField::Type, Some("Mouse")).unwrap();
        let err = s.select_field(SelectionField::Brand, Some("Kingston")).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionNotFound);
    }

    #[test]
    fn test_add_brand_without_type() {
        let prompt = ScriptedPrompt::new().answer("HyperX");
        let mut s = station(prompt.clone());

        let err = s.add_entry(Category::Brands).unwrap_err();
        assert_eq!(err.message, "Please select a Type first to add a brand to it.");
        assert!(prompt.asked().is_empty());
    }

    #[test]
    fn test_add_entry_prompts() {
        let prompt = ScriptedPrompt::new().answer("  Makati ").answer("HyperX").cancel();
        let mut s = station(prompt.clone());

        assert_eq!(s.add_entry(Category::Branches).unwrap().as_deref(), Some("Makati"));

        s.select_field(SelectionField::Type, Some("Ram")).unwrap();
        assert_eq!(s.add_entry(Category::Brands).unwrap().as_deref(), Some("HyperX"));
        assert_eq!(s.entries(Category::Brands), ["Kingston", "Samsung", "HyperX"]);

        assert_eq!(s.add_entry(Category::Types).unwrap(), None);
        assert_eq!(
            prompt.asked(),
            ["Enter new branches:", "Enter new Brand for Ram:", "Enter new types:"]
        );
    }

    #[test]
    fn test_remove_entry_requires_selection() {
        let prompt = ScriptedPrompt::new();
        let mut s = station(prompt.clone());
        let err = s.remove_entry(Category::Branches).unwrap_err();
        assert_eq!(err.message, "Select an item in the dropdown to remove.");
        assert!(prompt.asked().is_empty());
    }

    #[test]
    fn test_remove_entry_declined() {
        let prompt = ScriptedPrompt::new().confirm_with(false);
        let mut s = station(prompt.clone());
        s.select_field(SelectionField::Branch, Some("Cebu")).unwrap();

        assert!(!s.remove_entry(Category::Branches).unwrap());
        assert_eq!(prompt.asked(), ["Remove \"Cebu\"?"]);
        assert!(s.catalog().branches.iter().any(|b| b == "Cebu"));
        assert_eq!(s.selection().branch.as_deref(), Some("Cebu"));
    }

    #[test]
    fn test_remove_type_clears_type_and_brand() {
        let mut s = station(ScriptedPrompt::new().confirm_with(true));
        select_all(&mut s, "Cebu", "Mouse", "Logitech");

        assert!(s.remove_entry(Category::Types).unwrap());
        assert!(!s.catalog().types.iter().any(|t| t == "Mouse"));
        assert_eq!(s.selection().device_type, None);
        assert_eq!(s.selection().brand, None);
        assert_eq!(s.selection_state(), SelectionState::BranchOnly);
    }

    #[test]
    fn test_remove_branch_clears_only_branch() {
        let mut s = station(ScriptedPrompt::new().confirm_with(true));
        select_all(&mut s, "Pasay", "Monitor", "AOC");

        assert!(s.remove_entry(Category::Branches).unwrap());
        assert!(!s.catalog().branches.iter().any(|b| b == "Pasay"));
        assert_eq!(s.selection().branch, None);
        assert_eq!(s.selection().device_type.as_deref(), Some("Monitor"));
        assert_eq!(s.selection().brand.as_deref(), Some("AOC"));
    }

    #[test]
    fn test_remove_brand_clears_only_brand() {
        let mut s = station(ScriptedPrompt::new().confirm_with(true));
        select_all(&mut s, "Munoz", "Heatsink", "DeepCool");

        assert!(s.remove_entry(Category::Brands).unwrap());
        assert_eq!(s.entries(Category::Brands), ["Cooler Master"]);
        assert_eq!(s.selection().branch.as_deref(), Some("Munoz"));
        assert_eq!(s.selection().device_type.as_deref(), Some("Heatsink"));
        assert_eq!(s.selection().brand, None);
        assert!(!s.catalog().contains(Category::Brands, "DeepCool", Some("Heatsink")));
    }

    #[test]
    fn test_clear_queue() {
        let prompt = ScriptedPrompt::new().confirm_with(false).confirm_with(true);
        let mut s = station(prompt.clone());

        assert!(!s.clear_queue());
        assert!(prompt.asked().is_empty());

        select_all(&mut s, "Pasay", "Monitor", "AOC");
        s.generate().unwrap();
        assert!(!s.clear_queue());
        assert_eq!(s.queue().len(), 1);
        assert!(s.clear_queue());
        assert!(s.queue().is_empty());
    }

    #[test]
    fn test_remove_queue_entry() {
        let mut s = station(ScriptedPrompt::new());
        select_all(&mut s, "Pasay", "Monitor", "AOC");
        let first = s.generate().unwrap().id;
        let second = s.generate().unwrap().id;

        assert!(s.remove_queue_entry(first));
        assert!(!s.remove_queue_entry(first));
        assert_eq!(s.queue().len(), 1);
        assert_eq!(s.queue()[0].id, second);
    }

    #[tokio::test]
    async fn test_export_without_preview() {
        let s = station(ScriptedPrompt::new());
        let err = s.export_image(RasterFormat::Png).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoPreview);
        assert_eq!(err.message, "Generate a barcode first!");
    }

    #[tokio::test]
    async fn test_print_empty_queue() {
        let s = station(ScriptedPrompt::new());
        let err = s.print_all().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::QueueEmpty);
        assert_eq!(err.message, "No items to print");
    }
}

use metabox_core::{
    error::Error,
    interface::{
        AttributeStore, AuthorizationCheck, ItemId, OriginVerifier, RequestContext,
        StylesheetResource,
    },
    obs::SaveSink,
    persist::{SavePipeline, SaveVerdict},
    registry::FieldTypeRegistry,
    render::{Renderer, ViewModel},
};
use metabox_schema::{node::MetaBox, validate::validate_schema};

///
/// BoxRegistry
///
/// The explicit, host-owned list of registered boxes plus the shared
/// field-type registry. Constructed at startup, boxes validated as they
/// register, immutable once the host starts serving requests. There is no
/// ambient global registry.
///

pub struct BoxRegistry {
    field_types: FieldTypeRegistry,
    boxes: Vec<MetaBox>,
}

impl BoxRegistry {
    #[must_use]
    pub const fn new(field_types: FieldTypeRegistry) -> Self {
        Self {
            field_types,
            boxes: Vec::new(),
        }
    }

    /// Register one box. Structural validation and field-type resolution
    /// both run here; a box with an unknown field type never registers.
    pub fn register(&mut self, meta_box: MetaBox) -> Result<(), Error> {
        validate_schema(&meta_box)?;
        self.field_types.check_box(&meta_box)?;

        if self.boxes.iter().any(|b| b.id == meta_box.id) {
            return Err(Error::DuplicateBox(meta_box.id));
        }

        self.boxes.push(meta_box);
        Ok(())
    }

    #[must_use]
    pub const fn field_types(&self) -> &FieldTypeRegistry {
        &self.field_types
    }

    #[must_use]
    pub fn boxes(&self) -> &[MetaBox] {
        &self.boxes
    }

    pub fn boxes_for<'a>(
        &'a self,
        content_type: &'a str,
    ) -> impl Iterator<Item = &'a MetaBox> {
        self.boxes.iter().filter(move |b| b.targets(content_type))
    }

    /// Host "build render view" entry point: view-models plus the origin
    /// token the form must submit back, for every box targeting the
    /// content type.
    pub fn render_boxes(
        &self,
        content_type: &str,
        item: ItemId,
        store: &dyn AttributeStore,
        origin: &dyn OriginVerifier,
    ) -> Result<Vec<BoxView>, Error> {
        let renderer = Renderer::new(&self.field_types);

        self.boxes_for(content_type)
            .map(|meta_box| {
                let fields = renderer.render(meta_box, item, store)?;
                Ok(BoxView {
                    id: meta_box.id.clone(),
                    title: meta_box.title.clone(),
                    desc: meta_box.desc.clone(),
                    placement: meta_box.placement,
                    priority: meta_box.priority,
                    token: origin.issue_token(&meta_box.id),
                    fields,
                })
            })
            .collect()
    }

    /// Host "persist submission" entry point: runs the save pipeline for
    /// every box targeting the request's content type, in registration
    /// order. Each box saves (or skips) independently.
    #[allow(clippy::too_many_arguments)]
    pub fn save_boxes(
        &self,
        item: ItemId,
        ctx: &dyn RequestContext,
        origin: &dyn OriginVerifier,
        auth: &dyn AuthorizationCheck,
        store: &mut dyn AttributeStore,
        sheet: &mut dyn StylesheetResource,
        sink: &dyn SaveSink,
    ) -> Result<Vec<(String, SaveVerdict)>, Error> {
        let pipeline = SavePipeline::new(&self.field_types, sink);

        self.boxes_for(ctx.content_type())
            .map(|meta_box| {
                let verdict =
                    pipeline.save(meta_box, item, ctx, origin, auth, store, sheet)?;
                Ok((meta_box.id.clone(), verdict))
            })
            .collect()
    }
}

///
/// BoxView
/// One rendered box: header data, the origin token to embed in the form,
/// and the ordered field view-models.
///

#[derive(Clone, Debug, PartialEq)]
pub struct BoxView {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub placement: metabox_schema::types::Placement,
    pub priority: metabox_schema::types::Priority,
    pub token: String,
    pub fields: Vec<ViewModel>,
}

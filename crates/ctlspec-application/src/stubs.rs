//! Per-action stub bundles
//!
//! Each helper prepares the model's fixture and installs the stubs the
//! conventional controller action for it would touch.

use crate::context::ExampleContext;
use ctlspec_domain::constants::{ALL, DESTROY, ID_PARAM, NEW, PAGINATE, SAVE, UPDATE_ATTRIBUTES};
use ctlspec_domain::error::Result;
use ctlspec_domain::{ArgMatcher, EntityRef, Fixture, Reply};

impl ExampleContext {
    /// `Model.new` answers the fixture
    pub fn stubs_for_new<R: Into<EntityRef>>(&mut self, model: R) -> Result<Fixture> {
        let model = model.into();
        let fixture = self.prepare_model(model.clone())?;
        let class = self.model_class(model)?;
        self.factory
            .stub_method(&class, NEW, ArgMatcher::Any, Reply::from(&fixture));
        Ok(fixture)
    }

    /// `Model.new` answers the fixture, whose `save` answers `valid`
    pub fn stubs_for_create<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> Result<Fixture> {
        let fixture = self.stubs_for_new(model)?;
        self.factory
            .stub_method(&fixture, SAVE, ArgMatcher::Any, Reply::from(valid));
        Ok(fixture)
    }

    /// Finders answer the fixture, whose id becomes the `id` parameter
    pub fn stubs_for_show<R: Into<EntityRef>>(&mut self, model: R) -> Result<Fixture> {
        let model = model.into();
        let fixture = self.prepare_model(model.clone())?;
        self.bind_finders(model, &fixture)?;
        self.params.insert_if_absent(ID_PARAM, fixture.id().to_value());
        Ok(fixture)
    }

    /// Same stubs as [`Self::stubs_for_show`]
    pub fn stubs_for_edit<R: Into<EntityRef>>(&mut self, model: R) -> Result<Fixture> {
        self.stubs_for_show(model)
    }

    /// Show stubs plus `update_attributes` answering `valid`
    pub fn stubs_for_update<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> Result<Fixture> {
        let fixture = self.stubs_for_show(model)?;
        self.factory
            .stub_method(&fixture, UPDATE_ATTRIBUTES, ArgMatcher::Any, Reply::from(valid));
        Ok(fixture)
    }

    /// Show stubs plus `destroy` answering `valid`
    pub fn stubs_for_destroy<R: Into<EntityRef>>(&mut self, model: R, valid: bool) -> Result<Fixture> {
        let fixture = self.stubs_for_show(model)?;
        self.factory
            .stub_method(&fixture, DESTROY, ArgMatcher::Any, Reply::from(valid));
        Ok(fixture)
    }

    /// `Model.paginate` and `Model.all` answer a page holding the fixture
    pub fn stubs_for_index<R: Into<EntityRef>>(&mut self, model: R) -> Result<Fixture> {
        let model = model.into();
        let fixture = self.prepare_model(model.clone())?;
        let class = self.model_class(model)?;
        let page = Reply::Collection(vec![fixture.clone()]);
        self.factory
            .stub_method(&class, PAGINATE, ArgMatcher::Any, page.clone());
        self.factory.stub_method(&class, ALL, ArgMatcher::Any, page);
        Ok(fixture)
    }
}

use std::sync::Arc;

use cpboot_model::{ControllerManagerOptions, MasterOptions};

use crate::{
    client::{ClientHandle, CloudHandle},
    controller::ControllerFactory,
    scheduler::ConfigFactory,
    volume::VolumePluginFamilies,
};

/// Everything the bootstrap sequence needs, built once by the process.
///
/// Options start at their defaults; use the `with_*` builders to override them.
#[derive(Clone)]
pub struct StartupParams {
    client: ClientHandle,
    cloud: Option<CloudHandle>,
    master: MasterOptions,
    controllers: ControllerManagerOptions,
    volume_plugins: VolumePluginFamilies,
    controller_factory: Arc<dyn ControllerFactory>,
    scheduler_factory: Arc<dyn ConfigFactory>,
}

impl StartupParams {
    pub fn new(
        client: ClientHandle,
        volume_plugins: VolumePluginFamilies,
        controller_factory: Arc<dyn ControllerFactory>,
        scheduler_factory: Arc<dyn ConfigFactory>,
    ) -> Self {
        Self {
            client,
            cloud: None,
            master: MasterOptions::default(),
            controllers: ControllerManagerOptions::default(),
            volume_plugins,
            controller_factory,
            scheduler_factory,
        }
    }

    pub fn with_cloud(mut self, cloud: CloudHandle) -> Self {
        self.cloud = Some(cloud);
        self
    }

    pub fn with_master(mut self, master: MasterOptions) -> Self {
        self.master = master;
        self
    }

    pub fn with_controllers(mut self, controllers: ControllerManagerOptions) -> Self {
        self.controllers = controllers;
        self
    }

    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    pub fn cloud(&self) -> Option<&CloudHandle> {
        self.cloud.as_ref()
    }

    pub fn master(&self) -> &MasterOptions {
        &self.master
    }

    pub fn controllers(&self) -> &ControllerManagerOptions {
        &self.controllers
    }

    pub fn volume_plugins(&self) -> &VolumePluginFamilies {
        &self.volume_plugins
    }

    pub fn controller_factory(&self) -> &dyn ControllerFactory {
        self.controller_factory.as_ref()
    }

    pub fn scheduler_factory(&self) -> &dyn ConfigFactory {
        self.scheduler_factory.as_ref()
    }
}

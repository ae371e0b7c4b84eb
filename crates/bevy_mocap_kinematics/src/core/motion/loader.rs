use bevy::{
    asset::{AssetLoader, LoadContext, LoadedAsset, io::Reader},
    reflect::TypePath,
};
use serde::{Deserialize, Serialize};

use super::Motion;
use crate::core::{errors::AssetLoaderError, skeleton::Skeleton};

/// RON-facing description of a motion asset: where the AMC text lives and
/// which skeleton interprets it.
#[derive(Serialize, Deserialize, Clone)]
pub struct MotionSerial {
    /// Asset path of the raw AMC text file.
    pub source: String,
    /// Asset path of the skeleton (`.skn.ron`).
    pub skeleton: String,
    /// Scale override for positional data. Defaults to the skeleton's
    /// configured length scale.
    #[serde(default)]
    pub scale: Option<f64>,
}

#[derive(Default, TypePath)]
pub struct MotionLoader;

impl AssetLoader for MotionLoader {
    type Asset = Motion;
    type Settings = ();
    type Error = AssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        let serial: MotionSerial = ron::de::from_bytes(&bytes)?;

        // Owned paths: the nested loads hold the AssetPath past this scope.
        let skeleton_asset: LoadedAsset<Skeleton> = load_context
            .loader()
            .immediate()
            .load(serial.skeleton.clone())
            .await?;
        let skeleton = skeleton_asset.get();

        let amc_bytes = load_context.read_asset_bytes(serial.source.clone()).await?;
        let amc_text = String::from_utf8_lossy(&amc_bytes);

        let scale = serial.scale.unwrap_or_else(|| skeleton.length_scale());
        let mut motion = Motion::from_amc_str(&amc_text, scale, skeleton)?;
        motion.set_skeleton(load_context.loader().load(serial.skeleton.clone()));

        Ok(motion)
    }

    fn extensions(&self) -> &[&str] {
        &["mot.ron"]
    }
}

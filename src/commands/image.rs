//! # image 命令实现
//!
//! 图像处理命令的操作定义，参数交给 ImageMagick。
//!
//! ## 依赖关系
//! - 使用 `cli/image.rs` 定义的参数
//! - 使用 `tools/magick.rs` 组装参数

use super::Operation;
use crate::batch::{ExtensionSet, NamingPolicy};
use crate::cli::common::BatchArgs;
use crate::cli::image::{
    GrayscaleArgs, ImageCommands, ImageCompressArgs, ImageConvertArgs, ResizeArgs, RotateArgs,
};
use crate::tools::magick::{self, IMAGE_EXTENSIONS};
use crate::tools::ToolKind;

use std::ffi::OsString;
use std::path::Path;

/// 子命令到操作定义
pub fn operation(cmd: ImageCommands) -> Box<dyn Operation> {
    match cmd {
        ImageCommands::Resize(args) => Box::new(args),
        ImageCommands::Convert(args) => Box::new(args),
        ImageCommands::Compress(args) => Box::new(args),
        ImageCommands::Rotate(args) => Box::new(args),
        ImageCommands::Grayscale(args) => Box::new(args),
    }
}

fn image_extensions() -> ExtensionSet {
    ExtensionSet::new(IMAGE_EXTENSIONS)
}

impl Operation for ResizeArgs {
    fn title(&self) -> String {
        "Resizing images".to_string()
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Magick
    }

    fn extensions(&self) -> ExtensionSet {
        image_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-resized")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut ops: Vec<OsString> = Vec::new();
        // clap 的参数组保证至少给出一个尺寸
        if let Some(geometry) = magick::resize_geometry(self.width, self.height, self.percent, self.exact) {
            ops.push("-resize".into());
            ops.push(geometry.into());
        }
        magick::build_args(input, ops, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for ImageConvertArgs {
    fn title(&self) -> String {
        format!("Converting images to {}", self.to)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Magick
    }

    fn extensions(&self) -> ExtensionSet {
        image_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_extension(self.to.extension())
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut ops: Vec<OsString> = Vec::new();
        if let Some(quality) = self.quality {
            ops.push("-quality".into());
            ops.push(quality.to_string().into());
        }
        magick::build_args(input, ops, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for ImageCompressArgs {
    fn title(&self) -> String {
        format!("Compressing images (quality {})", self.quality)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Magick
    }

    fn extensions(&self) -> ExtensionSet {
        image_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-compressed")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let ops: Vec<OsString> = vec![
            "-strip".into(),
            "-quality".into(),
            self.quality.to_string().into(),
        ];
        magick::build_args(input, ops, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for RotateArgs {
    fn title(&self) -> String {
        format!("Rotating images by {}°", self.degrees)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Magick
    }

    fn extensions(&self) -> ExtensionSet {
        image_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-rotated")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        // -auto-orient 先应用 EXIF 方向，再按用户角度旋转
        let ops: Vec<OsString> = vec![
            "-auto-orient".into(),
            "-rotate".into(),
            self.degrees.to_string().into(),
        ];
        magick::build_args(input, ops, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for GrayscaleArgs {
    fn title(&self) -> String {
        "Converting images to grayscale".to_string()
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Magick
    }

    fn extensions(&self) -> ExtensionSet {
        image_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-gray")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let ops: Vec<OsString> = vec!["-colorspace".into(), "Gray".into()];
        magick::build_args(input, ops, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Protocol Objects - client-side values of the element wire protocol
//
// Each type here models one piece of the protocol the element proxy speaks:
// the handle itself, the locator strategies it searches with, the geometry
// and screenshot payloads it decodes, and the pluggable seams (file
// detection, output conversion) its sub-protocols consume.

pub mod element_handle;
pub mod file_detector;
pub mod geometry;
pub mod locator;
pub mod output_type;
pub mod shadow_root;

pub use element_handle::{Coordinates, ElementHandle, Unwrappable};
pub use file_detector::{FileDetector, LocalFileDetector, UselessFileDetector};
pub use geometry::{Dimension, Point, Rect};
pub use locator::By;
pub use output_type::{Base64Output, BytesOutput, OutputType};
pub use shadow_root::ShadowRoot;

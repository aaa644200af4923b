/// Colorspaces a pixel surface can be encoded in.
///
/// `SRGB` is the transit space: every transform either leaves it or
/// returns to it, never crossing directly between two alternates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colorspace {
	Cmy,
	Cmyk,
	Gray,
	Hsb,
	Hsl,
	Hwb,
	Lab,
	Log,
	Ohta,
	Rec601Luma,
	Rec601YCbCr,
	Rec709Luma,
	Rec709YCbCr,
	Rgb,
	SRGB,
	Xyz,
	YCbCr,
	Ycc,
	Yiq,
	YPbPr,
	Yuv,
}

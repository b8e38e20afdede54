use crate::image_reference::ImageReference;

/// Everything the result screen needs, handed over once when navigating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultScreenArgs {
    pub image: ImageReference,
    pub label_block: String,
    pub inference_time: String,
}

/// Shows what it was given. It never looks at scores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultScreen {
    args: ResultScreenArgs,
}

impl ResultScreen {
    pub fn new(args: ResultScreenArgs) -> Self {
        Self { args }
    }

    pub fn image(&self) -> &ImageReference {
        &self.args.image
    }

    pub fn text(&self) -> String {
        format!(
            "{}\nInference Time : {}",
            self.args.label_block, self.args.inference_time
        )
    }
}
